//! Error types for the Rephrase library.
//!
//! All fallible operations return [`RephraseError`] through the [`Result`]
//! alias. Failures of the remote rewrite oracle are described in more detail by
//! [`RewriteError`], which is nested inside [`RephraseError::Rewrite`].
//!
//! # Examples
//!
//! ```
//! use rephrase::error::{RephraseError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RephraseError::configuration("custom synonyms not loaded"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Rephrase operations.
///
/// Configuration and document-format errors are fatal for the call that raised
/// them. Analysis and rewrite errors are scoped to a single unit of work and are
/// isolated by the batch and document processors.
#[derive(Error, Debug)]
pub enum RephraseError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unknown resource selector, custom resource requested but never loaded,
    /// or out-of-range transformation parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or unreachable synonym/adjective source.
    #[error("Resource load error: {0}")]
    ResourceLoad(String),

    /// Tokenizer/tagger resource missing and could not be fetched.
    #[error("NLP oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// Tokenization or tagging failed for a unit of text.
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// The remote rewrite oracle failed.
    #[error("Rewrite oracle error: {0}")]
    Rewrite(#[from] RewriteError),

    /// Input is not a recognised document container or does not exist.
    #[error("Document format error: {0}")]
    DocumentFormat(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Failure modes of the remote rewrite oracle.
///
/// Each variant is distinguishable so callers can tell a server that is not
/// running apart from one that is slow or misbehaving.
#[derive(Error, Debug)]
pub enum RewriteError {
    /// Nothing is listening at the configured address.
    #[error("could not connect to rewrite server at {url}")]
    ConnectionRefused { url: String },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {seconds}s")]
    TimedOut { seconds: u64 },

    /// The server answered with a non-success status.
    #[error("server returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// The server answered but the payload could not be understood.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Any other transport failure.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Result type alias for operations that may fail with RephraseError.
pub type Result<T> = std::result::Result<T, RephraseError>;

impl RephraseError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        RephraseError::Configuration(msg.into())
    }

    /// Create a new resource load error.
    pub fn resource_load<S: Into<String>>(msg: S) -> Self {
        RephraseError::ResourceLoad(msg.into())
    }

    /// Create a new oracle-unavailable error.
    pub fn oracle_unavailable<S: Into<String>>(msg: S) -> Self {
        RephraseError::OracleUnavailable(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        RephraseError::Analysis(msg.into())
    }

    /// Create a new document format error.
    pub fn document_format<S: Into<String>>(msg: S) -> Self {
        RephraseError::DocumentFormat(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        RephraseError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        RephraseError::Configuration(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether the error must abort the whole call rather than a single unit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RephraseError::Configuration(_) | RephraseError::DocumentFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = RephraseError::configuration("unknown synonym list");
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown synonym list"
        );

        let error = RephraseError::document_format("not a document");
        assert_eq!(error.to_string(), "Document format error: not a document");

        let error = RephraseError::analysis("tagger failed");
        assert_eq!(error.to_string(), "Analysis error: tagger failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let rephrase_error = RephraseError::from(io_error);

        match rephrase_error {
            RephraseError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_rewrite_error_is_distinguishable() {
        let refused: RephraseError = RewriteError::ConnectionRefused {
            url: "http://localhost:11434".to_string(),
        }
        .into();
        let timed_out: RephraseError = RewriteError::TimedOut { seconds: 120 }.into();

        assert!(matches!(
            refused,
            RephraseError::Rewrite(RewriteError::ConnectionRefused { .. })
        ));
        assert!(matches!(
            timed_out,
            RephraseError::Rewrite(RewriteError::TimedOut { seconds: 120 })
        ));
        assert!(!refused.is_fatal());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(RephraseError::configuration("x").is_fatal());
        assert!(RephraseError::document_format("x").is_fatal());
        assert!(!RephraseError::analysis("x").is_fatal());
    }
}
