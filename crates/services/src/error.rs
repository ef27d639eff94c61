//! Shared error types for the services crate.

use thiserror::Error;

use engage_core::model::{CommentError, ParseIdError, QuestionId, QuizStateError, RatingError};

/// Errors raised while moving a request over the wire.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a backend request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RequestError {
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Shown when the backend gives no usable `error` field.
pub const GENERIC_REQUEST_FAILURE: &str = "Request failed";

impl RequestError {
    /// Text suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Status { message, .. } => message.clone(),
            RequestError::Transport(_) => "Network error, please try again later".to_string(),
            RequestError::Encode(_) | RequestError::Decode(_) => {
                GENERIC_REQUEST_FAILURE.to_string()
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors emitted by `ProgressTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error("module completion is already in flight")]
    CompletionPending,
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Errors emitted by `QuizManager`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz was already submitted")]
    AlreadySubmitted,
    #[error("{} question(s) unanswered", .missing.len())]
    Incomplete { missing: Vec<QuestionId> },
    #[error(transparent)]
    UnknownControl(#[from] ParseIdError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl From<QuizStateError> for QuizError {
    fn from(err: QuizStateError) -> Self {
        match err {
            QuizStateError::Incomplete { missing } => QuizError::Incomplete { missing },
            _ => QuizError::AlreadySubmitted,
        }
    }
}

/// Errors emitted by comment and rating flows.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngagementError {
    #[error(transparent)]
    Comment(#[from] CommentError),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{key} has an invalid value: {raw:?}")]
    InvalidValue { key: &'static str, raw: String },
}
