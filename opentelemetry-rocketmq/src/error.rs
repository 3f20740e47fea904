//! Errors raised by the client before a request leaves the process.
use std::fmt;
use thiserror::Error;

/// Kind of a [`ClientError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A name, address or payload does not have the required format.
    IllegalFormat,
}

impl ErrorCode {
    /// The name of the code as reported to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IllegalFormat => "ILLEGAL_FORMAT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a precondition of a client operation is violated.
///
/// These are never retried: the operation they guard must be aborted.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("[{code}] {message}")]
pub struct ClientError {
    code: ErrorCode,
    message: String,
}

impl ClientError {
    /// Create a new error.
    pub fn new<T: Into<String>>(code: ErrorCode, message: T) -> Self {
        ClientError {
            code,
            message: message.into(),
        }
    }

    /// Create an [`ErrorCode::IllegalFormat`] error.
    pub fn illegal_format<T: Into<String>>(message: T) -> Self {
        ClientError::new(ErrorCode::IllegalFormat, message)
    }

    /// The kind of the error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result of a client precondition check.
pub type ClientResult<T> = Result<T, ClientError>;
