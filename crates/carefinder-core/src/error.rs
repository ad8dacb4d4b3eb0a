// crates/carefinder-core/src/error.rs
use std::time::Duration;
use thiserror::Error;

/// Message shown when a failed load carries no backend-supplied detail.
pub const GENERIC_LOAD_ERROR: &str =
    "Could not load facilities. Please check that the backend is running.";

/// A failed facility fetch.
///
/// These never reach the views directly: the controller folds them into
/// [`LoadState::error`](crate::controller::LoadState) via
/// [`LoadError::user_message`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The request never produced a response (DNS, refused connection, TLS...).
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the client's timeout budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-2xx status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    /// The request could not even be built (bad base URL, empty city).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl LoadError {
    /// Backend-supplied detail message, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            LoadError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Human-readable text for the error block: the backend detail exactly
    /// as sent when present and non-blank, otherwise [`GENERIC_LOAD_ERROR`].
    pub fn user_message(&self) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(GENERIC_LOAD_ERROR)
            .to_string()
    }
}

/// Crate-level errors outside the load path (configuration, URL handling).
#[derive(Debug, Error)]
pub enum CareError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, CareError>;
