//! Error types for the ftsearch library.
//!
//! All fallible operations return [`FtSearchError`] through the crate-wide
//! [`Result`] alias. Errors are always handed back to the caller: nothing in
//! the library retries, logs-and-swallows, or returns a truncated result in
//! place of an error.
//!
//! # Examples
//!
//! ```
//! use ftsearch::error::{FtSearchError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FtSearchError::decode("reply is not a list"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for ftsearch operations.
#[derive(Error, Debug)]
pub enum FtSearchError {
    /// I/O errors (reading configuration or reply files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The reply did not match the shape expected for the command.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Index introspection produced a schema that cannot be reconstructed.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A request could not be constructed.
    #[error("Query error: {0}")]
    Query(String),

    /// Errors reported by the transport collaborator.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic anyhow error, mostly from transport implementations
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with FtSearchError.
pub type Result<T> = std::result::Result<T, FtSearchError>;

impl FtSearchError {
    /// Create a new decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Decode(msg.into())
    }

    /// Create a decode error naming the expected and actual reply shapes.
    pub fn unexpected_type<S: AsRef<str>>(context: S, expected: &str, actual: &str) -> Self {
        FtSearchError::Decode(format!(
            "{}: expected {expected}, got {actual}",
            context.as_ref()
        ))
    }

    /// Create a new schema error.
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Schema(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Query(msg.into())
    }

    /// Create a new transport error.
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Transport(msg.into())
    }

    /// Create a new invalid config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Config(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FtSearchError::Other(msg.into())
    }

    /// True for errors caused by a reply that could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, FtSearchError::Decode(_))
    }
}
