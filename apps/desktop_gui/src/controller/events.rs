//! Backend-to-UI events and error modeling for the desktop GUI controller.

use client_core::{session::REVIEWS_ERROR_MESSAGE, ListOutcome, ReviewOutcome, SessionState};
use shared::domain::Genre;

pub enum UiEvent {
    Info(String),
    Session(SessionState),
    ListSettled { genre: Genre, outcome: ListOutcome },
    ReviewsSettled { title: String, outcome: ReviewOutcome },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Auth,
    RateLimited,
    Transport,
    NoResults,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    BestSellers,
    Reviews,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("401")
            || message_lower.contains("403")
            || message_lower.contains("apikey")
            || message_lower.contains("api key")
            || message_lower.contains("unauthorized")
        {
            UiErrorCategory::Auth
        } else if message_lower.contains("429") || message_lower.contains("rate limit") {
            UiErrorCategory::RateLimited
        } else if message_lower.contains("no best sellers found") {
            UiErrorCategory::NoResults
        } else if message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("connect")
            || message_lower.contains("dns")
            || message_lower.contains("disconnected")
            || message_lower.contains("error sending request")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    /// Classifies the session's shared error line by the flow that set it.
    pub fn from_session_error(message: &str) -> Self {
        let context = if message == REVIEWS_ERROR_MESSAGE {
            UiErrorContext::Reviews
        } else {
            UiErrorContext::BestSellers
        };
        Self::from_message(context, message)
    }

    /// Advisory messages render as information rather than as a failure.
    pub fn is_advisory(&self) -> bool {
        self.category == UiErrorCategory::NoResults
    }

    pub fn banner_text(&self) -> String {
        if self.is_advisory() {
            return self.message.clone();
        }
        format!(
            "{} ({}): {}",
            err_label(self.category),
            context_label(self.context),
            self.message
        )
    }
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Auth => "Check your API key",
        UiErrorCategory::RateLimited => "Rate limited",
        UiErrorCategory::Transport => "Network",
        UiErrorCategory::NoResults => "No results",
        UiErrorCategory::Unknown => "Error",
    }
}

fn context_label(context: UiErrorContext) -> &'static str {
    match context {
        UiErrorContext::BackendStartup => "startup",
        UiErrorContext::BestSellers => "best sellers",
        UiErrorContext::Reviews => "reviews",
    }
}
