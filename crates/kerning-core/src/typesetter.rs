//! End-to-end pipeline: markup → tokens → line breaks → lines → pages.

use tracing::{debug, warn};

use crate::backend::OutputBackend;
use crate::compose::compose_paragraph;
use crate::encoding::encode_char;
use crate::error::{TypesetError, TypesetWarning, WarningCode};
use crate::font::FontSet;
use crate::hyphenation::{Hyphenator, Patterns};
use crate::linebreak::break_paragraph;
use crate::markup::{ParagraphBuilder, ROMAN, parse_blocks};
use crate::options::TypesetOptions;
use crate::paginate::{Compositor, LayoutSummary};

/// Typesets essays with fixed options, fonts and hyphenation patterns.
#[derive(Debug, Clone)]
pub struct Typesetter<'p> {
    options: TypesetOptions,
    fonts: FontSet,
    patterns: &'p Patterns,
}

impl<'p> Typesetter<'p> {
    pub fn new(options: TypesetOptions, fonts: FontSet, patterns: &'p Patterns) -> Self {
        Self {
            options,
            fonts,
            patterns,
        }
    }

    pub fn options(&self) -> &TypesetOptions {
        &self.options
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// Typeset `text` and draw it through `backend`.
    ///
    /// Any error aborts the document; the backend must not be finalized
    /// afterwards.
    pub fn run(
        &self,
        text: &str,
        backend: &mut dyn OutputBackend,
    ) -> Result<LayoutSummary, TypesetError> {
        self.options.validate()?;
        let roman = self.fonts.require(ROMAN)?.clone();

        let mut builder = ParagraphBuilder::new(&self.fonts)
            .with_indent(self.options.indent)
            .with_hyphen_penalty(self.options.breaking.hyphen_penalty);
        if self.options.hyphenate {
            builder = builder.with_hyphenator(
                Hyphenator::new(self.patterns)
                    .with_margins(self.options.left_hyphen_min, self.options.right_hyphen_min),
            );
        }

        let widths = self.options.line_widths();
        let blocks = parse_blocks(text);
        debug!(blocks = blocks.len(), "parsed essay");

        let mut compositor = Compositor::new(&self.options, backend).with_decoration_font(roman);
        for (index, block) in blocks.iter().enumerate() {
            let unencodable = block
                .plain_text()
                .chars()
                .filter(|c| encode_char(*c).is_none())
                .count();
            if unencodable > 0 {
                warn!(paragraph = index, unencodable, "characters outside WinAnsi will print as '?'");
                compositor.warn(
                    TypesetWarning::new(
                        WarningCode::UnencodableChar,
                        format!("{unencodable} character(s) cannot be encoded"),
                    )
                    .in_paragraph(index),
                );
            }

            let paragraph = builder.build(block, index)?;
            if paragraph.is_blank() {
                continue;
            }
            let breaks = break_paragraph(&paragraph, &widths, &self.options.breaking)?;

            if breaks
                .iter()
                .any(|b| !b.overfull && b.ratio > self.options.breaking.tolerance)
            {
                compositor.warn(
                    TypesetWarning::new(
                        WarningCode::RelaxedTolerance,
                        "set with the relaxed tolerance",
                    )
                    .in_paragraph(index),
                );
            }
            let relaxed = self.options.breaking.relaxed_tolerance;
            for b in breaks.iter().filter(|b| !b.overfull && b.ratio > relaxed) {
                warn!(paragraph = index, line = b.line, "underfull line");
                compositor.warn(
                    TypesetWarning::new(
                        WarningCode::UnderfullLine,
                        format!("line {} is stretched past the tolerance", b.line),
                    )
                    .in_paragraph(index),
                );
            }
            for b in breaks.iter().filter(|b| b.overfull) {
                warn!(paragraph = index, line = b.line, "overfull line");
                compositor.warn(
                    TypesetWarning::new(
                        WarningCode::OverfullLine,
                        format!("line {} is wider than the column", b.line),
                    )
                    .in_paragraph(index),
                );
            }

            let lines = compose_paragraph(&paragraph, &breaks, &widths);
            compositor.add_paragraph(lines)?;
        }
        compositor.finish()
    }
}
