//! Error types for the PDF backend.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps lopdf, font parsing and I/O failures and converts them to
//! [`TypesetError`].

use std::path::PathBuf;

use kerning_core::TypesetError;
use thiserror::Error;

/// Error type for PDF backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error building or serializing the PDF document.
    #[error("PDF write error: {0}")]
    Pdf(String),

    /// Error reading a font or writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A font file could not be read or parsed.
    #[error("font error in {}: {reason}", path.display())]
    Font {
        /// Path of the font file.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// A core library error.
    #[error(transparent)]
    Core(#[from] TypesetError),
}

impl From<lopdf::Error> for BackendError {
    fn from(err: lopdf::Error) -> Self {
        BackendError::Pdf(err.to_string())
    }
}

impl From<BackendError> for TypesetError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Pdf(msg) => TypesetError::Backend(msg),
            BackendError::Io(e) => TypesetError::Io(e),
            BackendError::Font { path, reason } => TypesetError::FontLoadError { path, reason },
            BackendError::Core(e) => e,
        }
    }
}
