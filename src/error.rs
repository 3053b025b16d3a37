use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SpkError>;

/// The two failure classes a request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller can fix the request (arguments, goal, k, file name).
    InvalidInput,
    /// The data itself cannot be processed for the requested goal.
    GenericProcessing,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpkError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("processing failed: {0}")]
    GenericProcessing(String),
}

impl SpkError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SpkError::InvalidInput(message.into())
    }

    pub fn generic(message: impl Into<String>) -> Self {
        SpkError::GenericProcessing(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SpkError::InvalidInput(_) => ErrorKind::InvalidInput,
            SpkError::GenericProcessing(_) => ErrorKind::GenericProcessing,
        }
    }
}
