//! Error types for the Cloudinary storage adapter.

use thiserror::Error;

/// All failure conditions surfaced by this crate.
///
/// `save` folds every upload failure into [`StorageError::Upload`]; the
/// remaining variants are raised by the lower-level client operations and
/// propagate unmodified.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Remote upload failed. The display string is part of the adapter
    /// contract: it carries the offending file path and nothing else.
    #[error("Could not upload image {path}")]
    Upload { path: String },

    /// Transport-level failure talking to the API.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The API answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError { code: u16, message: String },

    /// The API answered with a body this crate could not decode.
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Local file access failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Request could not be constructed from the given input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
