//! Error types for fmsh.
//!
//! Every fallible operation in the shell resolves to one of two kinds:
//! malformed input (wrong argument shape, unknown verb or flag) or a failed
//! operation (any filesystem/OS action that did not succeed). The session is
//! the single place that maps these kinds to user-facing text; handlers only
//! decide the kind and carry a short diagnostic message.

use std::io;

/// Errors produced by fmsh handlers.
#[derive(Debug, thiserror::Error)]
pub enum FmError {
    /// Malformed input: wrong argument count/shape, unknown verb or flag.
    #[error("invalid input: {0}")]
    Input(String),

    /// An I/O or OS action failed after valid input.
    #[error("operation failed: {0}")]
    Operation(String),
}

impl FmError {
    /// Construct an input-kind error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Construct an operation-kind error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// `true` for the input kind.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

// Anything not recognised as an input error is an operation failure.
impl From<io::Error> for FmError {
    fn from(err: io::Error) -> Self {
        Self::Operation(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, FmError>;
