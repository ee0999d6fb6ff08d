//! Error types
//!
//! Subscriber failures are absorbed by the registry; everything that reaches
//! the caller of [`GeneratorServer::run`](crate::GeneratorServer::run) is
//! fatal for the process.

use std::fmt;
use std::io;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for generator operations
#[derive(Debug)]
pub enum Error {
    /// Socket bind, accept, read, or write failure
    Io(io::Error),
    /// Sample could not be serialized or parsed as JSON
    Json(serde_json::Error),
    /// Connection closed in the middle of a frame
    UnexpectedEof {
        /// Bytes buffered without a terminating delimiter
        pending: usize,
    },
    /// Sample value is NaN or infinite and has no JSON representation
    NonFiniteValue(f64),
    /// The emitter task ended while the server was still running
    EmitterStopped(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::UnexpectedEof { pending } => {
                write!(f, "Connection closed with {} bytes of unterminated frame", pending)
            }
            Error::NonFiniteValue(v) => write!(f, "Sample value is not finite: {}", v),
            Error::EmitterStopped(reason) => write!(f, "Emitter stopped: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::UnexpectedEof { .. } | Error::NonFiniteValue(_) | Error::EmitterStopped(_) => {
                None
            }
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}
