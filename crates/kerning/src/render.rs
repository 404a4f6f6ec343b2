//! One-call helpers that run the whole pipeline.

use std::path::{Path, PathBuf};

use kerning_core::{
    DrawCall, FontSet, LayoutSummary, OutputBackend, Patterns, RecordingBackend, TypesetError,
    TypesetOptions, Typesetter,
};
use kerning_pdf::{PdfWriter, load_fonts};
use tracing::info;

/// A rendered PDF together with its layout summary.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Serialized PDF document.
    pub pdf: Vec<u8>,
    /// Pages, lines, fix-ups and warnings of the layout.
    pub summary: LayoutSummary,
}

/// Open a PDF writer sized from `options`, load `font_files` into it and
/// resolve the option's font specs.
fn prepare(
    options: &TypesetOptions,
    font_files: &[PathBuf],
) -> Result<(PdfWriter, FontSet), TypesetError> {
    options.validate()?;
    let mut writer = PdfWriter::new(options.page_width, options.page_height);
    load_fonts(&mut writer, font_files)?;
    let fonts = writer.get_fonts(&options.fonts)?;
    Ok((writer, fonts))
}

/// Typeset `text` into an in-memory PDF.
///
/// # Errors
///
/// Returns the first [`TypesetError`] raised while loading fonts, breaking
/// lines, paginating or serializing. No document is produced on error.
pub fn typeset_to_bytes(
    text: &str,
    options: &TypesetOptions,
    font_files: &[PathBuf],
    patterns: &Patterns,
) -> Result<Rendered, TypesetError> {
    let (mut writer, fonts) = prepare(options, font_files)?;
    let summary = Typesetter::new(options.clone(), fonts, patterns).run(text, &mut writer)?;
    let pdf = writer.to_bytes()?;
    Ok(Rendered { pdf, summary })
}

/// Typeset `text` and write the PDF to `output`.
///
/// The file is only created once the whole document has been laid out and
/// serialized.
///
/// # Errors
///
/// Same as [`typeset_to_bytes`], plus [`TypesetError::Io`] if `output`
/// cannot be written.
pub fn typeset_to_pdf(
    text: &str,
    options: &TypesetOptions,
    font_files: &[PathBuf],
    patterns: &Patterns,
    output: &Path,
) -> Result<LayoutSummary, TypesetError> {
    let rendered = typeset_to_bytes(text, options, font_files, patterns)?;
    std::fs::write(output, &rendered.pdf)?;
    info!(
        path = %output.display(),
        pages = rendered.summary.pages,
        lines = rendered.summary.lines,
        "wrote PDF"
    );
    Ok(rendered.summary)
}

/// Lay out `text` without producing a PDF, returning every draw call.
///
/// Font files are still loaded so their metrics drive the layout.
///
/// # Errors
///
/// Same as [`typeset_to_bytes`].
pub fn layout(
    text: &str,
    options: &TypesetOptions,
    font_files: &[PathBuf],
    patterns: &Patterns,
) -> Result<(LayoutSummary, Vec<DrawCall>), TypesetError> {
    let (_, fonts) = prepare(options, font_files)?;
    let mut recorder = RecordingBackend::new();
    let summary = Typesetter::new(options.clone(), fonts, patterns).run(text, &mut recorder)?;
    Ok((summary, recorder.calls().to_vec()))
}
