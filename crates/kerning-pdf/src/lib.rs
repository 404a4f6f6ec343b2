//! kerning-pdf: PDF output backend for kerning.
//!
//! Provides [`PdfWriter`], an [`OutputBackend`](kerning_core::OutputBackend)
//! that writes pages with [`lopdf`], and [`load_truetype`] which reads
//! TrueType metrics with [`ttf_parser`] so loaded faces can be measured and
//! embedded.

pub mod error;
pub mod truetype;
pub mod writer;

pub use error::BackendError;
pub use truetype::load_truetype;
pub use writer::{PdfWriter, load_fonts};
