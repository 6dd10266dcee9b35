//! Bridge between the UI thread and the tokio-driven coordinator.

pub mod commands;
pub mod runtime;
