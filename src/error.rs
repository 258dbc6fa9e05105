//! Error types for the Onoma library.
//!
//! Query operations in Onoma never fail: an empty result is the answer to
//! "nothing matched". Errors are reserved for loading, configuration and
//! broken internal invariants, and are all represented by [`OnomaError`].
//!
//! # Examples
//!
//! ```
//! use onoma::error::{OnomaError, Result};
//!
//! fn load_settings() -> Result<()> {
//!     Err(OnomaError::config("max_combinations must be positive"))
//! }
//!
//! match load_settings() {
//!     Ok(_) => println!("Loaded"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Onoma operations.
#[derive(Error, Debug)]
pub enum OnomaError {
    /// I/O errors (reading record sources, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record source could not be read as a whole
    #[error("Source error ({source_name}): {message}")]
    SourceLoad {
        /// Name of the failing source.
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// The in-memory index no longer satisfies its structural invariants
    #[error("Corrupt index: {0}")]
    CorruptIndex(String),

    /// Invalid argument passed by a caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with OnomaError.
pub type Result<T> = std::result::Result<T, OnomaError>;

impl OnomaError {
    /// Create a new source load error.
    pub fn source_load<N: Into<String>, S: Into<String>>(source_name: N, msg: S) -> Self {
        OnomaError::SourceLoad {
            source_name: source_name.into(),
            message: msg.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        OnomaError::Config(msg.into())
    }

    /// Create a new corrupt index error.
    pub fn corrupt_index<S: Into<String>>(msg: S) -> Self {
        OnomaError::CorruptIndex(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        OnomaError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = OnomaError::config("prefix_length must be positive");
        assert_eq!(
            error.to_string(),
            "Configuration error: prefix_length must be positive"
        );

        let error = OnomaError::source_load("banks.jsonl", "permission denied");
        assert_eq!(
            error.to_string(),
            "Source error (banks.jsonl): permission denied"
        );

        let error = OnomaError::corrupt_index("word_count 3 != terminal nodes 2");
        assert_eq!(
            error.to_string(),
            "Corrupt index: word_count 3 != terminal nodes 2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let onoma_error = OnomaError::from(io_error);

        match onoma_error {
            OnomaError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let onoma_error = OnomaError::from(json_error);

        assert!(matches!(onoma_error, OnomaError::Json(_)));
    }
}
