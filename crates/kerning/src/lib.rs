//! kerning: Typeset plain-text essays into paginated, justified PDF.
//!
//! This is the public API facade crate. It re-exports the types from
//! kerning-core and wires them to the PDF writer from kerning-pdf.
//!
//! # Architecture
//!
//! - **kerning-core**: Hyphenation, line breaking, composition and pagination
//! - **kerning-pdf**: PDF output backend and TrueType loading
//! - **kerning** (this crate): One-call helpers that tie everything together
//!
//! # Example
//!
//! ```ignore
//! let options = TypesetOptions::default();
//! let rendered = kerning::typeset_to_bytes(text, &options, &[], &Patterns::english())?;
//! std::fs::write("essay.pdf", rendered.pdf)?;
//! ```

pub mod render;

pub use kerning_core;
pub use kerning_pdf;

pub use kerning_core::{
    BreakOptions, DrawCall, Font, FontFace, FontSet, FontSpec, FontStyle, Hyphenator,
    LayoutSummary, OutputBackend, Patterns, RecordingBackend, TypesetError, TypesetOptions,
    TypesetWarning, Typesetter, WarningCode,
};
pub use kerning_pdf::{BackendError, PdfWriter};
pub use render::{Rendered, layout, typeset_to_bytes, typeset_to_pdf};
