//! Font faces, sized fonts and named font sets.
//!
//! A [`FontFace`] holds immutable glyph metrics in 1/1000 em units, shared
//! through an `Arc`. A [`Font`] is a face at a point size; tokens and lines
//! hold cheap clones of it and measure text through [`Font::width_of`].
//! [`FontSpec`] names a style (`roman`, `italic`, `title`) and a backend
//! resolves a list of them into a [`FontSet`].

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::encoding::encode_char;
use crate::error::TypesetError;
use crate::standard_fonts;

/// Ascent as a fraction of the point size.
const ASCENT_RATIO: f64 = 0.8;
/// Descent as a fraction of the point size.
const DESCENT_RATIO: f64 = 0.2;
/// Leading (line gap) as a fraction of the point size.
const LEADING_RATIO: f64 = 0.2;

/// Style of a type face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStyle {
    /// Upright, normal weight.
    #[default]
    Regular,
    /// Italic or oblique.
    Italic,
    /// Bold weight.
    Bold,
    /// Bold italic.
    BoldItalic,
}

impl FontStyle {
    /// Build a style from bold and italic flags.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => FontStyle::Regular,
            (false, true) => FontStyle::Italic,
            (true, false) => FontStyle::Bold,
            (true, true) => FontStyle::BoldItalic,
        }
    }

    /// Parse a style name such as `"Regular"`, `"Italic"` or `"Bold Italic"`.
    ///
    /// Matching is case-insensitive and ignores spaces, dashes and
    /// underscores, so `"bold-italic"` and `"BoldItalic"` are equivalent.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "regular" | "roman" | "normal" | "book" => Some(FontStyle::Regular),
            "italic" | "oblique" => Some(FontStyle::Italic),
            "bold" => Some(FontStyle::Bold),
            "bolditalic" | "italicbold" | "boldoblique" => Some(FontStyle::BoldItalic),
            _ => None,
        }
    }

    /// Whether this style is italic.
    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    /// Whether this style is bold.
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontStyle::Regular => "Regular",
            FontStyle::Italic => "Italic",
            FontStyle::Bold => "Bold",
            FontStyle::BoldItalic => "Bold Italic",
        })
    }
}

/// Immutable metrics of one type face.
///
/// Width values are in glyph space units (1/1000 of the em square) and are
/// indexed by WinAnsi character code.
#[derive(Debug, Clone)]
pub struct FontFace {
    /// PostScript / base font name, e.g. `Times-Roman`.
    name: String,
    /// Family name, e.g. `Times`.
    family: String,
    style: FontStyle,
    widths: Box<[u16; 256]>,
    /// Width used for characters outside the encoding.
    missing_width: u16,
    /// Ascender in glyph space units (positive).
    ascent: i16,
    /// Descender in glyph space units (negative).
    descent: i16,
    /// Font bounding box [llx, lly, urx, ury] in glyph space units.
    font_bbox: [i16; 4],
    /// Embedded font program (TrueType bytes), `None` for standard fonts.
    program: Option<Arc<Vec<u8>>>,
}

impl FontFace {
    /// Create a face from explicit metrics.
    pub fn new(
        name: impl Into<String>,
        family: impl Into<String>,
        style: FontStyle,
        widths: [u16; 256],
    ) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            style,
            widths: Box::new(widths),
            missing_width: 500,
            ascent: 800,
            descent: -200,
            font_bbox: [0, -200, 1000, 800],
            program: None,
        }
    }

    /// Create a face for one of the standard base fonts (e.g. `Times-Italic`).
    pub fn standard(base_font: &str) -> Option<Self> {
        let data = standard_fonts::lookup(base_font)?;
        let family = base_font.split('-').next().unwrap_or(base_font).to_string();
        let style = match base_font.split_once('-').map(|(_, s)| s) {
            Some("Italic") | Some("Oblique") => FontStyle::Italic,
            Some("Bold") => FontStyle::Bold,
            Some("BoldItalic") | Some("BoldOblique") => FontStyle::BoldItalic,
            _ => FontStyle::Regular,
        };
        Some(Self {
            name: base_font.to_string(),
            family,
            style,
            widths: Box::new(data.widths),
            missing_width: data.widths[b'?' as usize],
            ascent: data.ascent,
            descent: data.descent,
            font_bbox: data.font_bbox,
            program: None,
        })
    }

    /// Set the vertical metrics (builder pattern).
    pub fn with_vertical_metrics(mut self, ascent: i16, descent: i16) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    /// Set the font bounding box (builder pattern).
    pub fn with_bbox(mut self, font_bbox: [i16; 4]) -> Self {
        self.font_bbox = font_bbox;
        self
    }

    /// Set the width used for unencodable characters (builder pattern).
    pub fn with_missing_width(mut self, missing_width: u16) -> Self {
        self.missing_width = missing_width;
        self
    }

    /// Attach the embedded font program (builder pattern).
    pub fn with_program(mut self, program: Vec<u8>) -> Self {
        self.program = Some(Arc::new(program));
        self
    }

    /// PostScript / base font name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Style of the face.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Ascender in glyph space units.
    pub fn ascent(&self) -> i16 {
        self.ascent
    }

    /// Descender in glyph space units (negative).
    pub fn descent(&self) -> i16 {
        self.descent
    }

    /// Font bounding box in glyph space units.
    pub fn font_bbox(&self) -> [i16; 4] {
        self.font_bbox
    }

    /// Embedded font program, if the face was loaded from a file.
    pub fn program(&self) -> Option<&[u8]> {
        self.program.as_deref().map(Vec::as_slice)
    }

    /// Glyph widths indexed by WinAnsi code.
    pub fn widths(&self) -> &[u16; 256] {
        &self.widths
    }

    /// Advance width of a character in glyph space units.
    pub fn char_units(&self, c: char) -> u16 {
        match encode_char(c) {
            Some(code) => self.widths[code as usize],
            None => self.missing_width,
        }
    }
}

/// A face at a point size.
#[derive(Debug, Clone)]
pub struct Font {
    face: Arc<FontFace>,
    size: f64,
}

impl Font {
    /// Create a font from a shared face and a size in points.
    pub fn new(face: Arc<FontFace>, size: f64) -> Self {
        Self { face, size }
    }

    /// Convenience constructor for a standard base font.
    pub fn standard(base_font: &str, size: f64) -> Option<Self> {
        FontFace::standard(base_font).map(|face| Self::new(Arc::new(face), size))
    }

    /// The underlying face.
    pub fn face(&self) -> &Arc<FontFace> {
        &self.face
    }

    /// Base font name of the face.
    pub fn name(&self) -> &str {
        self.face.name()
    }

    /// Size in points.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Height above the baseline in points.
    pub fn ascent(&self) -> f64 {
        self.size * ASCENT_RATIO
    }

    /// Depth below the baseline in points (positive).
    pub fn descent(&self) -> f64 {
        self.size * DESCENT_RATIO
    }

    /// Gap between lines in points.
    pub fn leading(&self) -> f64 {
        self.size * LEADING_RATIO
    }

    /// Nominal text height in points (the point size).
    pub fn height(&self) -> f64 {
        self.size
    }

    /// Advance width of one character in points.
    pub fn char_width(&self, c: char) -> f64 {
        f64::from(self.face.char_units(c)) * self.size / 1000.0
    }

    /// Width of a text run in points.
    pub fn width_of(&self, text: &str) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.face.char_units(c))).sum();
        f64::from(units) * self.size / 1000.0
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.face, &other.face) || self.face.name == other.face.name)
            && self.size == other.size
    }
}

/// A named font request, e.g. `("italic", "Times", Italic, 11.0)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSpec {
    /// Name the typesetter refers to (`roman`, `italic`, `bold`, `title`).
    pub name: String,
    /// Family name of a loaded face or a standard family.
    pub family: String,
    /// Requested style.
    pub style: FontStyle,
    /// Size in points.
    pub size: f64,
}

impl FontSpec {
    pub fn new(name: impl Into<String>, family: impl Into<String>, style: FontStyle, size: f64) -> Self {
        Self {
            name: name.into(),
            family: family.into(),
            style,
            size,
        }
    }

    /// Resolve this spec against the standard base fonts.
    pub fn resolve_standard(&self) -> Result<Font, TypesetError> {
        standard_fonts::base_font_name(&self.family, self.style)
            .and_then(|base| Font::standard(base, self.size))
            .ok_or_else(|| TypesetError::FontMetricsMissing {
                font: format!("{} {}", self.family, self.style),
            })
    }
}

/// Fonts resolved from a list of [`FontSpec`]s, keyed by spec name.
#[derive(Debug, Clone, Default)]
pub struct FontSet {
    fonts: BTreeMap<String, Font>,
}

impl FontSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every spec against the standard base fonts.
    pub fn standard(specs: &[FontSpec]) -> Result<Self, TypesetError> {
        let mut set = Self::new();
        for spec in specs {
            set.insert(spec.name.clone(), spec.resolve_standard()?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, name: impl Into<String>, font: Font) {
        self.fonts.insert(name.into(), font);
    }

    pub fn get(&self, name: &str) -> Option<&Font> {
        self.fonts.get(name)
    }

    /// Look up a font, failing with [`TypesetError::FontMetricsMissing`].
    pub fn require(&self, name: &str) -> Result<&Font, TypesetError> {
        self.get(name).ok_or_else(|| TypesetError::FontMetricsMissing {
            font: name.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Font)> {
        self.fonts.iter().map(|(name, font)| (name.as_str(), font))
    }
}
