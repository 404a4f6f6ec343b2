//! Page and column composition.
//!
//! The [`Compositor`] fills columns with composed lines, closes a column
//! when the next line does not fit, and starts a new page after the last
//! column. At each column break it applies a single-line widow/orphan
//! fix-up before drawing the closed column through the backend.

use tracing::{debug, trace};

use crate::backend::OutputBackend;
use crate::compose::Line;
use crate::error::{TypesetError, TypesetWarning, WarningCode};
use crate::font::Font;
use crate::options::TypesetOptions;

/// Slack allowed when checking whether lines fit a column.
const FIT_EPSILON: f64 = 1e-6;

/// Compositor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Adding lines to the open column.
    Filling,
    /// Drawing a full column and moving to the next one.
    Closing,
    /// All content drawn.
    Done,
}

/// Counts and warnings from a finished layout.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutSummary {
    /// Pages emitted.
    pub pages: usize,
    /// Columns that received at least one line.
    pub columns: usize,
    /// Lines drawn.
    pub lines: usize,
    /// Widows fixed by carrying a line forward.
    pub widows_fixed: usize,
    /// Orphans fixed by carrying a line forward.
    pub orphans_fixed: usize,
    /// Widows and orphans that could not be fixed.
    pub violations_accepted: usize,
    /// Non-fatal compromises, in the order they happened.
    pub warnings: Vec<TypesetWarning>,
}

/// A line placed in the open column.
#[derive(Debug, Clone)]
struct PlacedLine {
    line: Line,
    /// Offset of the line's top from the top of the column.
    top: f64,
}

/// Mutable layout state owned by the compositor.
#[derive(Debug, Clone, Default)]
pub struct ComposerContext {
    /// Current page (0-based).
    pub page: usize,
    /// Open column on the current page (0-based).
    pub column: usize,
    /// Height used in the open column.
    pub cursor: f64,
    placed: Vec<PlacedLine>,
    /// The last column of the page was closed; the next line starts a page.
    page_full: bool,
}

impl ComposerContext {
    /// Number of lines in the open column.
    pub fn open_lines(&self) -> usize {
        self.placed.len()
    }
}

/// Composes lines into columns and pages.
pub struct Compositor<'b> {
    options: TypesetOptions,
    backend: &'b mut dyn OutputBackend,
    ctx: ComposerContext,
    state: State,
    current_font: Option<Font>,
    decoration_font: Option<Font>,
    summary: LayoutSummary,
}

impl<'b> Compositor<'b> {
    pub fn new(options: &TypesetOptions, backend: &'b mut dyn OutputBackend) -> Self {
        Self {
            options: options.clone(),
            backend,
            ctx: ComposerContext::default(),
            state: State::Filling,
            current_font: None,
            decoration_font: None,
            summary: LayoutSummary::default(),
        }
    }

    /// Font for the header and page numbers. Without one, pages carry no
    /// header or footer.
    pub fn with_decoration_font(mut self, font: Font) -> Self {
        self.decoration_font = Some(font);
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn context(&self) -> &ComposerContext {
        &self.ctx
    }

    /// Record a warning produced outside the compositor.
    pub fn warn(&mut self, warning: TypesetWarning) {
        self.summary.warnings.push(warning);
    }

    fn transition(&mut self, next: State) {
        trace!(
            from = ?self.state,
            to = ?next,
            page = self.ctx.page,
            column = self.ctx.column,
            "compositor transition"
        );
        self.state = next;
    }

    /// Add the lines of one paragraph.
    ///
    /// # Errors
    ///
    /// Returns [`TypesetError::ColumnOverflowUnresolvable`] if a line is
    /// taller than a column, or any error from the backend.
    pub fn add_paragraph(&mut self, lines: Vec<Line>) -> Result<(), TypesetError> {
        let budget = self.options.column_height();
        let count = lines.len();

        for (i, line) in lines.into_iter().enumerate() {
            if line.height() > budget + FIT_EPSILON {
                return Err(TypesetError::ColumnOverflowUnresolvable {
                    paragraph: line.paragraph(),
                    line: line.index(),
                    height: line.height(),
                    budget,
                });
            }
            self.ensure_page()?;

            let spacing = if i == 0 && !self.ctx.placed.is_empty() {
                self.options.paragraph_spacing
            } else {
                0.0
            };
            if self.ctx.cursor + spacing + line.height() <= budget + FIT_EPSILON {
                self.place(line, spacing);
                continue;
            }

            let carried = if self.options.avoid_widows_orphans {
                self.fix_up(&line, count)
            } else {
                Vec::new()
            };
            self.transition(State::Closing);
            self.close_column()?;
            self.transition(State::Filling);
            self.ensure_page()?;
            for carried_line in carried {
                self.place(carried_line, 0.0);
            }
            self.place(line, 0.0);
        }
        Ok(())
    }

    fn place(&mut self, line: Line, spacing: f64) {
        let top = self.ctx.cursor + spacing;
        self.ctx.cursor = top + line.height();
        self.ctx.placed.push(PlacedLine { line, top });
    }

    /// Widow/orphan fix-up before closing the open column because
    /// `incoming` does not fit. Returns the lines to carry to the next
    /// column, already removed from the open one.
    fn fix_up(&mut self, incoming: &Line, count: usize) -> Vec<Line> {
        let budget = self.options.column_height();
        let Some(last) = self.ctx.placed.last() else {
            return Vec::new();
        };
        let same_paragraph = last.line.paragraph() == incoming.paragraph();
        let fits = last.line.height() + incoming.height() <= budget + FIT_EPSILON;
        let keeps_a_line = self.ctx.placed.len() >= 2;

        // Orphan: the paragraph's first line alone at the bottom.
        if same_paragraph && incoming.index() == 1 && last.line.is_first() {
            if keeps_a_line && fits {
                self.summary.orphans_fixed += 1;
                debug!(paragraph = incoming.paragraph(), "orphan fixed by carrying one line");
                return self.ctx.placed.pop().map(|p| vec![p.line]).unwrap_or_default();
            }
            self.accept(WarningCode::OrphanAccepted, incoming.paragraph());
            return Vec::new();
        }

        // Widow: the paragraph's last line alone at the top of the next column.
        if same_paragraph && incoming.is_last() && count >= 2 && incoming.index() >= 1 {
            let leaves_orphan = self.ctx.placed.len() >= 2 && {
                let before = &self.ctx.placed[self.ctx.placed.len() - 2].line;
                before.paragraph() == incoming.paragraph() && before.is_first()
            };
            if keeps_a_line && fits && !leaves_orphan {
                self.summary.widows_fixed += 1;
                debug!(paragraph = incoming.paragraph(), "widow fixed by carrying one line");
                return self.ctx.placed.pop().map(|p| vec![p.line]).unwrap_or_default();
            }
            self.accept(WarningCode::WidowAccepted, incoming.paragraph());
        }
        Vec::new()
    }

    fn accept(&mut self, code: WarningCode, paragraph: usize) {
        let what = match code {
            WarningCode::OrphanAccepted => "orphan",
            _ => "widow",
        };
        debug!(paragraph, page = self.ctx.page, "{what} accepted, no valid single-line shift");
        self.summary.violations_accepted += 1;
        self.summary.warnings.push(
            TypesetWarning::new(code, format!("{what} left in place; no valid single-line shift"))
                .in_paragraph(paragraph)
                .on_page(self.ctx.page),
        );
    }

    /// Draw the open column and advance to the next one.
    fn close_column(&mut self) -> Result<(), TypesetError> {
        let placed = std::mem::take(&mut self.ctx.placed);
        if !placed.is_empty() {
            let x0 = self.options.column_x(self.ctx.column);
            let y0 = self.options.margin_top;
            for PlacedLine { line, top } in &placed {
                let baseline = y0 + top + line.ascent();
                for run in line.runs() {
                    self.select_font(&run.font)?;
                    self.backend.draw_text(x0 + run.x, baseline, &run.text)?;
                }
            }
            self.summary.columns += 1;
            self.summary.lines += placed.len();
        }
        self.ctx.cursor = 0.0;
        self.ctx.column += 1;
        if self.ctx.column >= self.options.columns {
            self.ctx.page_full = true;
        }
        Ok(())
    }

    /// Start a new page if the last one is full.
    fn ensure_page(&mut self) -> Result<(), TypesetError> {
        if self.ctx.page_full {
            self.decorate_page()?;
            self.backend.new_page()?;
            self.ctx.page += 1;
            self.ctx.column = 0;
            self.ctx.page_full = false;
            // Font state does not carry across pages.
            self.current_font = None;
            trace!(page = self.ctx.page, "new page");
        }
        Ok(())
    }

    fn select_font(&mut self, font: &Font) -> Result<(), TypesetError> {
        if self.current_font.as_ref() != Some(font) {
            self.backend.set_font(font)?;
            self.current_font = Some(font.clone());
        }
        Ok(())
    }

    /// Draw the header and footer of the current page.
    fn decorate_page(&mut self) -> Result<(), TypesetError> {
        let Some(font) = self.decoration_font.clone() else {
            return Ok(());
        };
        if let Some(header) = self.options.header.clone() {
            self.select_font(&font)?;
            let y = self.options.margin_top / 2.0;
            self.backend.draw_text(self.options.margin_left, y, &header)?;
        }
        if self.options.page_numbers {
            self.select_font(&font)?;
            let number = (self.ctx.page + 1).to_string();
            let x = (self.options.page_width - font.width_of(&number)) / 2.0;
            let y = self.options.page_height - self.options.margin_bottom / 2.0;
            self.backend.draw_text(x, y, &number)?;
        }
        Ok(())
    }

    /// Close the last column, decorate the last page and return the summary.
    pub fn finish(mut self) -> Result<LayoutSummary, TypesetError> {
        self.transition(State::Closing);
        if !self.ctx.placed.is_empty() {
            self.close_column()?;
        }
        self.decorate_page()?;
        self.transition(State::Done);
        self.summary.pages = self.ctx.page + 1;
        Ok(self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{DrawCall, RecordingBackend};
    use crate::compose::compose_paragraph;
    use crate::linebreak::{BreakOptions, LineWidths, break_paragraph};
    use crate::token::{Paragraph, ParagraphKind, Token};

    /// Two 144 × 60pt columns: five 24pt Courier words per line, five 12pt
    /// lines per column.
    fn options() -> TypesetOptions {
        TypesetOptions {
            page_width: 372.0,
            page_height: 132.0,
            margin_top: 36.0,
            margin_bottom: 36.0,
            margin_left: 36.0,
            margin_right: 36.0,
            columns: 2,
            gutter: 12.0,
            indent: 0.0,
            paragraph_spacing: 0.0,
            page_numbers: false,
            ..TypesetOptions::default()
        }
    }

    /// Lines of paragraph `index` holding `words` words labelled `a000`,
    /// `a001`, ... (letter by paragraph).
    fn lines(index: usize, words: usize) -> Vec<Line> {
        let font = Font::standard("Courier", 10.0).unwrap();
        let letter = (b'a' + index as u8) as char;
        let mut tokens = Vec::new();
        for i in 0..words {
            if i > 0 {
                tokens.push(Token::space(&font));
            }
            tokens.push(Token::word(format!("{letter}{i:03}"), &font));
        }
        let paragraph = Paragraph::new(index, ParagraphKind::Body, tokens);
        let widths = LineWidths::Uniform(144.0);
        let breaks = break_paragraph(&paragraph, &widths, &BreakOptions::default()).unwrap();
        compose_paragraph(&paragraph, &breaks, &widths)
    }

    fn layout(opts: &TypesetOptions, paragraphs: &[usize]) -> (LayoutSummary, RecordingBackend) {
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::new(opts, &mut backend);
        for (i, &words) in paragraphs.iter().enumerate() {
            compositor.add_paragraph(lines(i, words)).unwrap();
        }
        let summary = compositor.finish().unwrap();
        (summary, backend)
    }

    fn position_of(backend: &RecordingBackend, word: &str) -> (usize, f64, f64) {
        backend
            .calls()
            .iter()
            .find_map(|call| match call {
                DrawCall::Text { page, x, y, text, .. } if text == word => Some((*page, *x, *y)),
                _ => None,
            })
            .unwrap()
    }

    // ========== filling ==========

    #[test]
    fn fills_columns_then_pages() {
        // 5 + 3 + 6 lines.
        let (summary, backend) = layout(&options(), &[23, 12, 30]);
        assert_eq!(summary.pages, 2);
        assert_eq!(summary.columns, 3);
        assert_eq!(summary.lines, 14);
        assert_eq!(backend.page_count(), 2);
        assert_eq!(position_of(&backend, "a000"), (0, 36.0, 44.0));
        assert_eq!(position_of(&backend, "b000"), (0, 192.0, 44.0));
        assert_eq!(position_of(&backend, "c010"), (1, 36.0, 44.0));
    }

    #[test]
    fn font_is_set_once_per_page() {
        let (_, backend) = layout(&options(), &[23, 12, 30]);
        assert_eq!(backend.font_changes(), 2);
    }

    #[test]
    fn paragraph_spacing_dropped_at_column_top() {
        let opts = TypesetOptions {
            paragraph_spacing: 6.0,
            ..options()
        };
        // a: 5 lines fills column one; b starts column two without spacing.
        let (_, backend) = layout(&opts, &[25, 5, 5]);
        assert_eq!(position_of(&backend, "b000"), (0, 192.0, 44.0));
        assert_eq!(position_of(&backend, "c000"), (0, 192.0, 44.0 + 12.0 + 6.0));
    }

    #[test]
    fn line_taller_than_column_fails() {
        let opts = TypesetOptions {
            page_height: 82.0,
            ..options()
        };
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::new(&opts, &mut backend);
        let err = compositor.add_paragraph(lines(0, 3)).unwrap_err();
        assert!(matches!(
            err,
            TypesetError::ColumnOverflowUnresolvable { paragraph: 0, line: 0, .. }
        ));
    }

    // ========== widows and orphans ==========

    #[test]
    fn orphan_carried_to_next_column() {
        // a: 4 lines, b: 3 lines; b's first line would sit alone at the bottom.
        let (summary, backend) = layout(&options(), &[20, 12]);
        assert_eq!(summary.orphans_fixed, 1);
        assert_eq!(summary.violations_accepted, 0);
        assert_eq!(position_of(&backend, "b000"), (0, 192.0, 44.0));
    }

    #[test]
    fn orphan_left_when_policy_disabled() {
        let opts = TypesetOptions {
            avoid_widows_orphans: false,
            ..options()
        };
        let (summary, backend) = layout(&opts, &[20, 12]);
        assert_eq!(summary.orphans_fixed, 0);
        assert_eq!(position_of(&backend, "b000"), (0, 36.0, 92.0));
    }

    #[test]
    fn widow_fixed_by_carrying_previous_line() {
        // a: 2 lines, b: 4 lines; b's last line would open column two alone.
        let (summary, backend) = layout(&options(), &[10, 20]);
        assert_eq!(summary.widows_fixed, 1);
        assert_eq!(position_of(&backend, "b010"), (0, 192.0, 44.0));
        assert_eq!(position_of(&backend, "b015"), (0, 192.0, 56.0));
    }

    #[test]
    fn widow_accepted_when_shift_would_orphan() {
        // a: 3 lines, b: 3 lines; carrying b's middle line strands its first.
        let (summary, backend) = layout(&options(), &[15, 15]);
        assert_eq!(summary.widows_fixed, 0);
        assert_eq!(summary.violations_accepted, 1);
        assert_eq!(summary.warnings.len(), 1);
        assert_eq!(summary.warnings[0].code, WarningCode::WidowAccepted);
        assert_eq!(summary.warnings[0].paragraph, Some(1));
        assert_eq!(position_of(&backend, "b010"), (0, 192.0, 44.0));
    }

    // ========== state and decorations ==========

    #[test]
    fn finish_reaches_done() {
        let mut backend = RecordingBackend::new();
        let compositor = Compositor::new(&options(), &mut backend);
        assert_eq!(compositor.state(), State::Filling);
        let summary = compositor.finish().unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.lines, 0);
    }

    #[test]
    fn header_and_page_numbers_drawn_per_page() {
        let opts = TypesetOptions {
            header: Some("Essay".to_string()),
            page_numbers: true,
            ..options()
        };
        let mut backend = RecordingBackend::new();
        let mut compositor = Compositor::new(&opts, &mut backend)
            .with_decoration_font(Font::standard("Courier", 10.0).unwrap());
        for (i, words) in [23, 12, 30].into_iter().enumerate() {
            compositor.add_paragraph(lines(i, words)).unwrap();
        }
        compositor.finish().unwrap();

        assert_eq!(backend.text_on_page(0).iter().filter(|t| **t == "Essay").count(), 1);
        assert!(backend.text_on_page(0).contains(&"1"));
        assert!(backend.text_on_page(1).contains(&"2"));
        let (_, x, y) = position_of(&backend, "2");
        assert_eq!(x, (372.0 - 6.0) / 2.0);
        assert_eq!(y, 132.0 - 18.0);
    }
}
