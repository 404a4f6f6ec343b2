//! Output backend trait.
//!
//! Defines the [`OutputBackend`] trait the compositor draws through, and
//! [`RecordingBackend`], an in-memory implementation that records every
//! call. Concrete document writers (PDF) live in their own crates.

use std::path::Path;
use std::sync::Arc;

use crate::error::TypesetError;
use crate::font::{Font, FontFace, FontSet, FontSpec};

/// Trait abstracting document output.
///
/// The backend starts with one open page. Coordinates passed to
/// [`draw_text`](OutputBackend::draw_text) are in points with the origin at
/// the top-left corner of the page; `y` is the baseline of the text.
///
/// # Usage
///
/// ```ignore
/// let face = backend.load_font(Path::new("fonts/GenBasR.ttf"))?;
/// let fonts = backend.get_fonts(&specs)?;
/// backend.set_font(fonts.require("roman")?)?;
/// backend.draw_text(72.0, 80.0, "Hello")?;
/// backend.new_page()?;
/// ```
pub trait OutputBackend {
    /// Load a TrueType font file and make it available to
    /// [`get_fonts`](OutputBackend::get_fonts).
    ///
    /// # Errors
    ///
    /// Returns [`TypesetError::FontLoadError`] if the file is missing or
    /// cannot be parsed.
    fn load_font(&mut self, path: &Path) -> Result<Arc<FontFace>, TypesetError>;

    /// Resolve named font specs into fonts.
    ///
    /// # Errors
    ///
    /// Returns [`TypesetError::FontMetricsMissing`] if a spec matches no
    /// loaded face and no standard family.
    fn get_fonts(&mut self, specs: &[FontSpec]) -> Result<FontSet, TypesetError>;

    /// Finish the current page and start a new one.
    fn new_page(&mut self) -> Result<(), TypesetError>;

    /// Select the font used by subsequent [`draw_text`](OutputBackend::draw_text) calls.
    fn set_font(&mut self, font: &Font) -> Result<(), TypesetError>;

    /// Draw `text` with its baseline starting at (`x`, `y`).
    fn draw_text(&mut self, x: f64, y: f64, text: &str) -> Result<(), TypesetError>;
}

/// One call recorded by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawCall {
    /// A new page was started.
    NewPage,
    /// The current font changed.
    SetFont { name: String, size: f64 },
    /// Text was drawn.
    Text {
        /// Page index (0-based).
        page: usize,
        x: f64,
        y: f64,
        text: String,
        /// Base font name in effect.
        font: String,
        size: f64,
    },
}

/// A backend that records draw calls in memory.
///
/// Only the standard fonts are available; [`load_font`](OutputBackend::load_font)
/// always fails.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    page: usize,
    font: Option<(String, f64)>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls in order.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Number of pages, including the initial one.
    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Recorded text calls.
    pub fn texts(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Text { .. }))
    }

    /// Text strings drawn on `page`, in drawing order.
    pub fn text_on_page(&self, page: usize) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { page: p, text, .. } if *p == page => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of font changes recorded.
    pub fn font_changes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::SetFont { .. }))
            .count()
    }
}

impl OutputBackend for RecordingBackend {
    fn load_font(&mut self, path: &Path) -> Result<Arc<FontFace>, TypesetError> {
        let reason = if path.exists() {
            "the recording backend only provides standard fonts"
        } else {
            "file not found"
        };
        Err(TypesetError::FontLoadError {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        })
    }

    fn get_fonts(&mut self, specs: &[FontSpec]) -> Result<FontSet, TypesetError> {
        FontSet::standard(specs)
    }

    fn new_page(&mut self) -> Result<(), TypesetError> {
        self.page += 1;
        self.calls.push(DrawCall::NewPage);
        Ok(())
    }

    fn set_font(&mut self, font: &Font) -> Result<(), TypesetError> {
        self.font = Some((font.name().to_string(), font.size()));
        self.calls.push(DrawCall::SetFont {
            name: font.name().to_string(),
            size: font.size(),
        });
        Ok(())
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) -> Result<(), TypesetError> {
        let (font, size) = self
            .font
            .clone()
            .ok_or_else(|| TypesetError::Backend("draw_text called before set_font".to_string()))?;
        self.calls.push(DrawCall::Text {
            page: self.page,
            x,
            y,
            text: text.to_string(),
            font,
            size,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontStyle;

    #[test]
    fn records_calls_in_order() {
        let mut backend = RecordingBackend::new();
        let font = Font::standard("Times-Roman", 12.0).unwrap();
        backend.set_font(&font).unwrap();
        backend.draw_text(72.0, 90.0, "Hello").unwrap();
        backend.new_page().unwrap();
        backend.draw_text(72.0, 90.0, "World").unwrap();

        assert_eq!(backend.page_count(), 2);
        assert_eq!(backend.calls().len(), 4);
        assert_eq!(backend.text_on_page(0), vec!["Hello"]);
        assert_eq!(backend.text_on_page(1), vec!["World"]);
        assert_eq!(backend.font_changes(), 1);
    }

    #[test]
    fn draw_before_set_font_fails() {
        let mut backend = RecordingBackend::new();
        assert!(matches!(
            backend.draw_text(0.0, 0.0, "x"),
            Err(TypesetError::Backend(_))
        ));
    }

    #[test]
    fn load_font_missing_file() {
        let mut backend = RecordingBackend::new();
        let err = backend
            .load_font(Path::new("/nonexistent/GenBasR.ttf"))
            .unwrap_err();
        match err {
            TypesetError::FontLoadError { reason, .. } => assert_eq!(reason, "file not found"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn get_fonts_resolves_standard_families() {
        let mut backend = RecordingBackend::new();
        let fonts = backend
            .get_fonts(&[FontSpec::new("roman", "Helvetica", FontStyle::Bold, 9.0)])
            .unwrap();
        assert_eq!(fonts.require("roman").unwrap().name(), "Helvetica-Bold");
    }
}
