//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while loading a mesh
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Index out of range: {message}")]
    IndexOutOfRange { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;

impl From<twobe_core::Error> for IoError {
    fn from(e: twobe_core::Error) -> Self {
        match e {
            twobe_core::Error::Io(e) => IoError::Io(e),
            twobe_core::Error::InvalidData(message) => IoError::IndexOutOfRange { message },
            other => IoError::ParseError { message: other.to_string() },
        }
    }
}
