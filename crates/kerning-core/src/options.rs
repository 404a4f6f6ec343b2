//! Typesetting options.

use crate::error::TypesetError;
use crate::font::{FontSpec, FontStyle};
use crate::linebreak::{BreakOptions, LineWidths};
use crate::markup::{BOLD, ITALIC, ROMAN, TITLE};

/// Options controlling page geometry, line breaking and composition.
///
/// Provides sensible defaults for all settings: a single-column US Letter
/// page with one-inch margins, set in 11pt Times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TypesetOptions {
    /// Page width in points (default: 612).
    pub page_width: f64,
    /// Page height in points (default: 792).
    pub page_height: f64,
    /// Top margin in points (default: 72).
    pub margin_top: f64,
    /// Bottom margin in points (default: 72).
    pub margin_bottom: f64,
    /// Left margin in points (default: 72).
    pub margin_left: f64,
    /// Right margin in points (default: 72).
    pub margin_right: f64,
    /// Number of columns per page (default: 1).
    pub columns: usize,
    /// Space between columns in points (default: 18).
    pub gutter: f64,
    /// Line breaking tolerances, penalties and demerits.
    pub breaking: BreakOptions,
    /// Whether to hyphenate body text (default: true).
    pub hyphenate: bool,
    /// Minimum characters before a hyphen (default: 2).
    pub left_hyphen_min: usize,
    /// Minimum characters after a hyphen (default: 2).
    pub right_hyphen_min: usize,
    /// Whether to fix widows and orphans at column breaks (default: true).
    pub avoid_widows_orphans: bool,
    /// First-line indent of body paragraphs in points (default: 18).
    pub indent: f64,
    /// Vertical space between paragraphs in points (default: 6).
    pub paragraph_spacing: f64,
    /// Text drawn at the top of every page (default: None).
    pub header: Option<String>,
    /// Whether to draw page numbers in the footer (default: true).
    pub page_numbers: bool,
    /// Fonts to resolve: `roman`, `italic`, `bold` and `title`.
    pub fonts: Vec<FontSpec>,
}

impl Default for TypesetOptions {
    fn default() -> Self {
        Self {
            page_width: 612.0,
            page_height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
            columns: 1,
            gutter: 18.0,
            breaking: BreakOptions::default(),
            hyphenate: true,
            left_hyphen_min: 2,
            right_hyphen_min: 2,
            avoid_widows_orphans: true,
            indent: 18.0,
            paragraph_spacing: 6.0,
            header: None,
            page_numbers: true,
            fonts: Self::font_family("Times", 11.0),
        }
    }
}

impl TypesetOptions {
    /// Options for an A4 page (595 × 842 pt), otherwise default.
    pub fn a4() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            ..Self::default()
        }
    }

    /// The four standard font specs for `family` with body text at `size`.
    ///
    /// Headings are set at 1.6 times the body size in the bold style.
    pub fn font_family(family: &str, size: f64) -> Vec<FontSpec> {
        vec![
            FontSpec::new(ROMAN, family, FontStyle::Regular, size),
            FontSpec::new(ITALIC, family, FontStyle::Italic, size),
            FontSpec::new(BOLD, family, FontStyle::Bold, size),
            FontSpec::new(TITLE, family, FontStyle::Bold, (size * 1.6).round()),
        ]
    }

    /// Width of one column in points.
    pub fn column_width(&self) -> f64 {
        let content = self.page_width - self.margin_left - self.margin_right;
        let gutters = self.gutter * self.columns.saturating_sub(1) as f64;
        (content - gutters) / self.columns.max(1) as f64
    }

    /// Height available to text in one column, in points.
    pub fn column_height(&self) -> f64 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Left edge of column `column` (0-based) in points.
    pub fn column_x(&self, column: usize) -> f64 {
        self.margin_left + column as f64 * (self.column_width() + self.gutter)
    }

    /// Target line widths for body paragraphs.
    pub fn line_widths(&self) -> LineWidths {
        LineWidths::Uniform(self.column_width())
    }

    /// Check that the options describe a usable layout.
    ///
    /// # Errors
    ///
    /// Returns [`TypesetError::InvalidOptions`] for zero columns, a
    /// non-positive column width or height, negative spacing, or an
    /// inverted tolerance pair.
    pub fn validate(&self) -> Result<(), TypesetError> {
        let invalid = |msg: String| Err(TypesetError::InvalidOptions(msg));
        if self.columns == 0 {
            return invalid("columns must be at least 1".to_string());
        }
        if self.column_width() <= 0.0 {
            return invalid(format!(
                "column width is {:.2}pt; margins and gutters leave no room",
                self.column_width()
            ));
        }
        if self.column_height() <= 0.0 {
            return invalid(format!(
                "column height is {:.2}pt; margins leave no room",
                self.column_height()
            ));
        }
        if self.gutter < 0.0 || self.indent < 0.0 || self.paragraph_spacing < 0.0 {
            return invalid("gutter, indent and paragraph spacing must not be negative".to_string());
        }
        if self.breaking.tolerance < 0.0
            || self.breaking.relaxed_tolerance < self.breaking.tolerance
        {
            return invalid(format!(
                "tolerance {} and relaxed tolerance {} must satisfy 0 <= tolerance <= relaxed",
                self.breaking.tolerance, self.breaking.relaxed_tolerance
            ));
        }
        if self.fonts.iter().any(|spec| spec.size <= 0.0) {
            return invalid("font sizes must be positive".to_string());
        }
        Ok(())
    }
}
