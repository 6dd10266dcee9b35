//! UI layer for the desktop GUI.

pub mod app;
