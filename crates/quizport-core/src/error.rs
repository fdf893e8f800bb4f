//! Error types for the quiz session engine.
//!
//! `ContentError` is defined here rather than in the HTTP client crate so
//! the loader and submitter can classify failures without string matching.

use thiserror::Error;

/// Failures talking to the content API.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The credential was missing or rejected (HTTP 401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The configured base URL cannot carry request paths.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Failures building a session from a subject's question set.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The question set could not be fetched.
    #[error("failed to fetch questions for '{subject}': {source}")]
    Fetch {
        subject: String,
        #[source]
        source: ContentError,
    },

    /// The subject has no questions.
    #[error("no questions available for '{0}'")]
    EmptyResult(String),

    /// The load was abandoned before the fetch completed.
    #[error("load abandoned for '{0}'")]
    Abandoned(String),
}

/// The single submission attempt failed. It is not retried.
#[derive(Debug, Error)]
#[error("failed to submit results for '{subject}': {source}")]
pub struct SubmissionError {
    pub subject: String,
    #[source]
    pub source: ContentError,
}

/// A user action that the session rejected. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session is no longer accepting input.
    #[error("session is {0}, input is disabled")]
    InputDisabled(&'static str),

    /// The option is not one of the current question's choices.
    #[error("'{0}' is not an option for this question")]
    UnknownOption(String),

    /// Option position out of range for the current question.
    #[error("option {position} out of range (question has {available})")]
    OptionOutOfRange { position: usize, available: usize },

    /// Submission requires the current question to be answered.
    #[error("question {} has not been answered", .0 + 1)]
    Unanswered(usize),

    /// Manual submission is only offered on the last question.
    #[error("manual submission is only available on the last question")]
    NotLastQuestion,

    /// The session actor has stopped.
    #[error("session closed")]
    Closed,
}
