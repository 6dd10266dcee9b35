use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Superseded by a newer request; never surfaced to the user.
    Cancelled,
    Transport,
    Timeout,
    HttpStatus(u16),
    Decode,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(FetchErrorKind::Cancelled, "request cancelled")
    }

    pub fn status(code: u16, detail: Option<String>) -> Self {
        let message = match detail {
            Some(detail) => format!("HTTP {code}: {detail}"),
            None => format!("HTTP {code}"),
        };
        Self::new(FetchErrorKind::HttpStatus(code), message)
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == FetchErrorKind::Cancelled
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Drops the request URL from the message: it carries the API key.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let kind = if err.is_timeout() {
            FetchErrorKind::Timeout
        } else if err.is_decode() {
            FetchErrorKind::Decode
        } else if let Some(status) = err.status() {
            FetchErrorKind::HttpStatus(status.as_u16())
        } else {
            FetchErrorKind::Transport
        };
        Self::new(kind, err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(
            FetchErrorKind::Decode,
            format!("malformed response body: {err}"),
        )
    }
}
