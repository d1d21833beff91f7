//! Error types for fetchware.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`RegistrationError`] - Errors raised synchronously while building routes
//! - [`PipelineError`] - Errors that end an in-flight middleware pipeline

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message carried by [`PipelineError::InvalidReturn`].
pub const INVALID_RETURN_MESSAGE: &str =
    "middleware must return a Response, a Request, a pair, or the termination primitive";

/// Errors raised at registration time.
///
/// These are never recovered automatically; the caller has to fix the
/// registration that produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The route pattern is malformed or uses crowded placeholders.
    #[error("invalid path specified `{pattern}`: {reason}")]
    InvalidPattern {
        /// The pattern as written by the author.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The verb is not one of `get`, `post`, `put`, `delete`, `head`, `all`.
    #[error("method \"{0}\" is not supported")]
    UnsupportedMethod(String),

    /// The handler exposes no way to handle a fetch request.
    #[error("middleware `{0}` cannot handle fetch requests")]
    UnsupportedHandler(String),

    /// A dispatcher was built without a fallback handler.
    #[error("a fallback middleware is required")]
    MissingFallback,
}

impl RegistrationError {
    /// Shorthand for [`RegistrationError::InvalidPattern`].
    pub fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that abort a middleware pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A middleware returned a value that is not a recognized shape.
    #[error("middleware must return a Response, a Request, a pair, or the termination primitive")]
    InvalidReturn,

    /// The termination primitive was invoked without a response.
    #[error("the pipeline cannot be ended without a response")]
    EndWithoutResponse,

    /// A middleware panicked.
    #[error("middleware panicked: {0}")]
    Panicked(String),

    /// A middleware failed with its own error.
    #[error(transparent)]
    Middleware(BoxError),
}

impl PipelineError {
    /// Wraps a boxed error, unwrapping it first when it already is a
    /// [`PipelineError`].
    pub fn from_boxed(error: BoxError) -> Self {
        match error.downcast::<PipelineError>() {
            Ok(inner) => *inner,
            Err(other) => PipelineError::Middleware(other),
        }
    }
}

impl From<BoxError> for PipelineError {
    fn from(err: BoxError) -> Self {
        PipelineError::from_boxed(err)
    }
}
