/*!
 * Error types for the penerjemah application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors caused by the request itself, before any model is touched.
///
/// These are recoverable: the caller fixes the input and resubmits.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The request carried no text to translate
    #[error("Nothing to translate: source text is empty")]
    EmptyText,

    /// The request exceeded the input length ceiling
    #[error("Source text is too long: {length} characters (limit {max})")]
    TooLong {
        /// Actual character count of the input
        length: usize,
        /// Maximum allowed character count
        max: usize,
    },
}

/// Errors that can occur while loading model artifacts for a direction.
///
/// A load failure makes that direction unavailable until the artifact store
/// is fixed externally; the cache retries on the next request.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// A required artifact file or directory is absent
    #[error("Missing model artifact: {0}")]
    MissingArtifact(PathBuf),

    /// An artifact exists but cannot be used
    #[error("Invalid model artifact {path}: {reason}")]
    InvalidArtifact {
        /// Path of the offending artifact
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// An artifact's content does not match its recorded checksum
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Path of the offending artifact
        path: PathBuf,
        /// Checksum recorded in the sidecar file
        expected: String,
        /// Checksum computed from the file content
        actual: String,
    },

    /// The tokenizer configuration failed to load
    #[error("Failed to load tokenizer: {0}")]
    Tokenizer(String),

    /// The inference backend rejected the model
    #[error("Inference backend failed to load model: {0}")]
    Backend(String),
}

/// Errors that can occur during decoding of an accepted request.
///
/// These are recoverable from the caller's point of view: the model pair is
/// intact and a retry may succeed.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Text-to-token conversion failed
    #[error("Tokenization failed: {0}")]
    Tokenize(String),

    /// The decoding run itself failed
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// The translate call exceeded its time budget
    #[error("Translation timed out after {0} seconds")]
    Timeout(u64),

    /// The decoding resource is exhausted and cannot accept the call
    #[error("Decoding resource exhausted: {0}")]
    ResourceExhausted(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from request validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from model loading
    #[error("Model load error: {0}")]
    ModelLoad(#[from] ModelLoadError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
