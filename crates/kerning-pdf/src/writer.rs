//! PDF document writer.
//!
//! [`PdfWriter`] implements [`OutputBackend`] by accumulating one content
//! stream per page and building the document with [`lopdf`] when it is
//! finalized. Standard fonts are referenced as Type1 fonts; faces loaded
//! from TrueType files are embedded with their widths and descriptor. All
//! text is encoded as WinAnsi.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use kerning_core::encoding::encode_lossy;
use kerning_core::{Font, FontFace, FontSet, FontSpec, OutputBackend, TypesetError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use tracing::{debug, warn};

use crate::error::BackendError;
use crate::truetype::load_truetype;

/// First character code listed in the `Widths` array of embedded fonts.
const FIRST_CHAR: usize = 32;
/// Last character code listed in the `Widths` array of embedded fonts.
const LAST_CHAR: usize = 255;

/// Writes typeset pages to a PDF document.
///
/// The writer starts with one open page. Nothing touches the file system
/// until [`save`](PdfWriter::save) is called, so an aborted run leaves no
/// partial output behind.
#[derive(Debug)]
pub struct PdfWriter {
    width: f64,
    height: f64,
    /// Content stream of each page.
    pages: Vec<String>,
    /// Faces loaded from font files, in load order.
    loaded: Vec<Arc<FontFace>>,
    /// Faces referenced by the content, indexed by resource number - 1.
    used: Vec<Arc<FontFace>>,
    /// Resource index and size of the current font.
    current: Option<(usize, f64)>,
    /// Characters replaced because they have no WinAnsi code.
    replaced: usize,
}

impl PdfWriter {
    /// Create a writer for pages of `width` × `height` points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: vec![String::new()],
            loaded: Vec::new(),
            used: Vec::new(),
            current: None,
            replaced: 0,
        }
    }

    /// Number of pages, including the open one.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of characters drawn as `?` so far.
    pub fn replaced_chars(&self) -> usize {
        self.replaced
    }

    /// Faces loaded with [`load_font`](OutputBackend::load_font).
    pub fn loaded_faces(&self) -> &[Arc<FontFace>] {
        &self.loaded
    }

    /// Build the document and serialize it.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Pdf`] if lopdf fails to serialize the document.
    pub fn to_bytes(&self) -> Result<Vec<u8>, BackendError> {
        let mut doc = self.build_document();
        let mut buf = Vec::new();
        doc.save_to(&mut buf)?;
        debug!(pages = self.pages.len(), bytes = buf.len(), "serialized PDF");
        Ok(buf)
    }

    /// Build the document and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), BackendError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        debug!(path = %path.display(), "saved PDF");
        Ok(())
    }

    fn resource_index(&mut self, face: &Arc<FontFace>) -> usize {
        if let Some(index) = self
            .used
            .iter()
            .position(|f| Arc::ptr_eq(f, face) || f.name() == face.name())
        {
            return index;
        }
        self.used.push(Arc::clone(face));
        self.used.len() - 1
    }

    fn build_document(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for (index, face) in self.used.iter().enumerate() {
            let font_id = add_font(&mut doc, face);
            fonts.set(format!("F{}", index + 1), Object::Reference(font_id));
        }
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let media_box = vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(self.width as f32),
            Object::Real(self.height as f32),
        ];

        let mut kids = Vec::with_capacity(self.pages.len());
        for content in &self.pages {
            let stream = Stream::new(dictionary! {}, content.clone().into_bytes());
            let content_id = doc.add_object(stream);
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => Object::Reference(pages_id),
                "MediaBox" => media_box.clone(),
                "Contents" => Object::Reference(content_id),
                "Resources" => Object::Reference(resources_id),
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        let info_id = doc.add_object(dictionary! {
            "Producer" => Object::string_literal("kerning"),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc.trailer.set("Info", Object::Reference(info_id));
        doc
    }
}

/// Add the font dictionary for `face` and return its object id.
fn add_font(doc: &mut Document, face: &FontFace) -> ObjectId {
    let Some(program) = face.program() else {
        return doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.name(),
            "Encoding" => "WinAnsiEncoding",
        });
    };

    let file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => program.len() as i64 },
        program.to_vec(),
    ));

    // Nonsymbolic, plus Italic when set.
    let mut flags: i64 = 32;
    if face.style().is_italic() {
        flags |= 64;
    }
    let italic_angle: i64 = if face.style().is_italic() { -12 } else { 0 };
    let stem_v: i64 = if face.style().is_bold() { 120 } else { 80 };
    let bbox: Vec<Object> = face
        .font_bbox()
        .iter()
        .map(|v| Object::Integer(i64::from(*v)))
        .collect();

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => face.name(),
        "Flags" => flags,
        "FontBBox" => bbox,
        "ItalicAngle" => italic_angle,
        "Ascent" => i64::from(face.ascent()),
        "Descent" => i64::from(face.descent()),
        "CapHeight" => i64::from(face.ascent()),
        "StemV" => stem_v,
        "MissingWidth" => i64::from(face.char_units('\u{FFFD}')),
        "FontFile2" => Object::Reference(file_id),
    });

    let widths: Vec<Object> = face.widths()[FIRST_CHAR..=LAST_CHAR]
        .iter()
        .map(|w| Object::Integer(i64::from(*w)))
        .collect();

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => face.name(),
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => widths,
        "FontDescriptor" => Object::Reference(descriptor_id),
        "Encoding" => "WinAnsiEncoding",
    })
}

/// Format a coordinate for a content stream: at most three decimals,
/// trailing zeros removed.
fn number(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        _ => text.to_string(),
    }
}

/// Escape WinAnsi bytes as a PDF literal string body.
fn escape(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7E => out.push(char::from(b)),
            _ => out.push_str(&format!("\\{b:03o}")),
        }
    }
    out
}

impl OutputBackend for PdfWriter {
    fn load_font(&mut self, path: &Path) -> Result<Arc<FontFace>, TypesetError> {
        let face = Arc::new(load_truetype(path)?);
        self.loaded.retain(|f| f.name() != face.name());
        self.loaded.push(Arc::clone(&face));
        Ok(face)
    }

    fn get_fonts(&mut self, specs: &[FontSpec]) -> Result<FontSet, TypesetError> {
        let mut set = FontSet::new();
        for spec in specs {
            let loaded = self
                .loaded
                .iter()
                .find(|face| {
                    face.family().eq_ignore_ascii_case(&spec.family) && face.style() == spec.style
                });
            let font = match loaded {
                Some(face) => Font::new(Arc::clone(face), spec.size),
                None => spec.resolve_standard()?,
            };
            debug!(spec = %spec.name, font = font.name(), size = spec.size, "resolved font");
            set.insert(spec.name.clone(), font);
        }
        Ok(set)
    }

    fn new_page(&mut self) -> Result<(), TypesetError> {
        self.pages.push(String::new());
        // Each page re-selects its font.
        self.current = None;
        Ok(())
    }

    fn set_font(&mut self, font: &Font) -> Result<(), TypesetError> {
        let index = self.resource_index(font.face());
        self.current = Some((index, font.size()));
        Ok(())
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str) -> Result<(), TypesetError> {
        let (index, size) = self
            .current
            .ok_or_else(|| TypesetError::Backend("draw_text called before set_font".to_string()))?;
        let (bytes, replaced) = encode_lossy(text);
        if replaced > 0 {
            warn!(text, replaced, "characters outside WinAnsi replaced with '?'");
            self.replaced += replaced;
        }

        let height = self.height;
        let content = self
            .pages
            .last_mut()
            .ok_or_else(|| TypesetError::Backend("no open page".to_string()))?;
        content.push_str(&format!(
            "BT /F{} {} Tf {} {} Td ({}) Tj ET\n",
            index + 1,
            number(size),
            number(x),
            number(height - y),
            escape(&bytes)
        ));
        Ok(())
    }
}

/// Convenience for callers that hold font paths rather than a writer.
///
/// Loads every path into `writer`, failing on the first bad file.
///
/// # Errors
///
/// Returns [`TypesetError::FontLoadError`] for a missing or unparseable file.
pub fn load_fonts(writer: &mut PdfWriter, paths: &[PathBuf]) -> Result<Vec<Arc<FontFace>>, TypesetError> {
    paths.iter().map(|path| writer.load_font(path)).collect()
}
