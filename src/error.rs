//! Error types for failures that abort a production-split run.
//!
//! All three classes are unrecoverable: a run either fully succeeds with a
//! complete output or fails with no output written. Errors are propagated
//! through [`anyhow::Error`] and can be recovered with `downcast_ref` where a
//! caller needs to distinguish them.
use std::fmt;

/// A failure that invalidates the whole run.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitError {
    /// A negative consumption or capacity value was found in the input data
    InvalidInput(String),
    /// The merit order and the capacity data disagree about which sources exist
    Configuration(String),
    /// An hour's month has no matching row in the capacity dataset
    Join(String),
}

impl SplitError {
    /// An `InvalidInput` error with the given message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        SplitError::InvalidInput(message.into())
    }

    /// A `Configuration` error with the given message
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        SplitError::Configuration(message.into())
    }

    /// A `Join` error with the given message
    pub fn join<S: Into<String>>(message: S) -> Self {
        SplitError::Join(message.into())
    }
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::InvalidInput(message) => write!(f, "invalid input: {message}"),
            SplitError::Configuration(message) => write!(f, "configuration error: {message}"),
            SplitError::Join(message) => write!(f, "join error: {message}"),
        }
    }
}

impl std::error::Error for SplitError {}
