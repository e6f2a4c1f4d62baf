//! Shared error types for the services crate.

use thiserror::Error;

use trivia_core::SessionError;

/// Errors emitted by a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("batch size must be between 1 and {max}, got {requested}")]
    InvalidAmount { requested: u32, max: u32 },
    #[error("question source has no results for this query")]
    NoResults,
    #[error("question source rejected the request parameters")]
    InvalidParameter,
    #[error("question source is rate limiting requests")]
    RateLimited,
    #[error("question source returned response code {code}")]
    Api { code: u8 },
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("question source is unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizLoopService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
