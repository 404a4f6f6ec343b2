//! Error and warning types for kerning.
//!
//! Provides [`TypesetError`] for fatal errors that abort a document,
//! [`TypesetWarning`] for non-fatal compromises the engine made while laying
//! out (accepted widows, relaxed tolerance, overfull lines), and
//! [`WarningCode`] to categorize them.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error types for typesetting.
///
/// Any of these aborts the current document; backends never finalize a
/// partial document after one is returned.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// A word cannot be hyphenated (too short, or non-alphabetic).
    ///
    /// The pipeline never propagates this: such words stay unbreakable.
    #[error("word '{word}' cannot be hyphenated")]
    HyphenationUnavailable {
        /// The offending word.
        word: String,
    },

    /// No breaking within tolerance exists, even after the relaxed retry.
    #[error("no feasible line breaks for paragraph {paragraph}")]
    NoFeasibleBreak {
        /// Index of the paragraph in the document (0-based).
        paragraph: usize,
    },

    /// A single line is taller than the whole column.
    #[error(
        "line {line} of paragraph {paragraph} is {height:.2}pt tall, \
         column budget is {budget:.2}pt"
    )]
    ColumnOverflowUnresolvable {
        /// Index of the paragraph in the document (0-based).
        paragraph: usize,
        /// Index of the line within the paragraph (0-based).
        line: usize,
        /// Height of the offending line in points.
        height: f64,
        /// Height budget of the column in points.
        budget: f64,
    },

    /// A font file is missing or cannot be parsed.
    #[error("cannot load font {}: {reason}", path.display())]
    FontLoadError {
        /// Path of the font file.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// A font name or style could not be resolved to metrics.
    #[error("no metrics available for font '{font}'")]
    FontMetricsMissing {
        /// Name of the requested font.
        font: String,
    },

    /// The typesetting options are inconsistent (e.g. zero columns).
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// I/O error while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by an output backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Machine-readable code for categorizing layout warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WarningCode {
    /// A paragraph only broke after retrying with the relaxed tolerance.
    RelaxedTolerance,
    /// A word wider than the line was set on an overfull line.
    OverfullLine,
    /// A line was stretched past the relaxed tolerance by the emergency pass.
    UnderfullLine,
    /// A widow could not be fixed with a single-line shift.
    WidowAccepted,
    /// An orphan could not be fixed with a single-line shift.
    OrphanAccepted,
    /// A character has no glyph in the target encoding.
    UnencodableChar,
}

impl WarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningCode::RelaxedTolerance => "RELAXED_TOLERANCE",
            WarningCode::OverfullLine => "OVERFULL_LINE",
            WarningCode::UnderfullLine => "UNDERFULL_LINE",
            WarningCode::WidowAccepted => "WIDOW_ACCEPTED",
            WarningCode::OrphanAccepted => "ORPHAN_ACCEPTED",
            WarningCode::UnencodableChar => "UNENCODABLE_CHAR",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal compromise made while typesetting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypesetWarning {
    /// Machine-readable warning code.
    pub code: WarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Paragraph index (0-based), if applicable.
    pub paragraph: Option<usize>,
    /// Page number (0-based), if applicable.
    pub page: Option<usize>,
}

impl TypesetWarning {
    /// Create a warning with a code and description.
    pub fn new(code: WarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            paragraph: None,
            page: None,
        }
    }

    /// Attach the paragraph index (builder pattern).
    pub fn in_paragraph(mut self, paragraph: usize) -> Self {
        self.paragraph = Some(paragraph);
        self
    }

    /// Attach the page index (builder pattern).
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }
}

impl fmt::Display for TypesetWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(paragraph) = self.paragraph {
            write!(f, " (paragraph {paragraph})")?;
        }
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        Ok(())
    }
}
