//! Composing broken paragraphs into positioned lines.

use std::ops::Range;

use crate::font::Font;
use crate::linebreak::{Break, LineWidths, line_start};
use crate::token::{Paragraph, ParagraphKind, Token};

/// A run of text in one font, positioned within its line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRun {
    /// Offset from the left edge of the line in points.
    pub x: f64,
    pub text: String,
    pub font: Font,
}

impl PlacedRun {
    /// Right edge of the run.
    pub fn end(&self) -> f64 {
        self.x + self.font.width_of(&self.text)
    }
}

/// One composed line of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    paragraph: usize,
    index: usize,
    tokens: Range<usize>,
    runs: Vec<PlacedRun>,
    width: f64,
    ratio: f64,
    ascent: f64,
    descent: f64,
    leading: f64,
    offset: f64,
    last: bool,
    hyphenated: bool,
    overfull: bool,
}

impl Line {
    /// Index of the paragraph this line belongs to.
    pub fn paragraph(&self) -> usize {
        self.paragraph
    }

    /// Position of this line within its paragraph (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tokens of the paragraph covered by this line, including the
    /// discarded glue after the previous break and the break itself.
    pub fn tokens(&self) -> Range<usize> {
        self.tokens.clone()
    }

    pub fn runs(&self) -> &[PlacedRun] {
        &self.runs
    }

    /// Set width of the line after justification.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Adjustment ratio applied to the line's glue.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn ascent(&self) -> f64 {
        self.ascent
    }

    pub fn descent(&self) -> f64 {
        self.descent
    }

    pub fn leading(&self) -> f64 {
        self.leading
    }

    /// Vertical space taken by the line.
    pub fn height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }

    /// Baseline position relative to the top of the paragraph.
    pub fn baseline(&self) -> f64 {
        self.offset + self.ascent
    }

    /// Whether this is the last line of its paragraph.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Whether this is the first line of its paragraph.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Whether the line ends with a discretionary hyphen.
    pub fn is_hyphenated(&self) -> bool {
        self.hyphenated
    }

    /// Whether the line is wider than its target width.
    pub fn is_overfull(&self) -> bool {
        self.overfull
    }

    /// Text of the line as drawn, runs separated by single spaces where the
    /// line has glue between them.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut previous_end: Option<f64> = None;
        for run in &self.runs {
            if previous_end.is_some_and(|end| run.x > end + 1e-9) {
                out.push(' ');
            }
            out.push_str(&run.text);
            previous_end = Some(run.end());
        }
        out
    }
}

/// Compose the lines of a paragraph from its chosen breaks.
///
/// Body lines other than the last are justified to their target width.
/// The last line and heading lines keep natural spacing, shrinking only
/// when they would otherwise overflow.
pub fn compose_paragraph(paragraph: &Paragraph, breaks: &[Break], widths: &LineWidths) -> Vec<Line> {
    let tokens = paragraph.tokens();
    let mut lines = Vec::with_capacity(breaks.len());
    let mut previous: Option<usize> = None;
    let mut offset = 0.0;

    for (index, brk) in breaks.iter().enumerate() {
        let last = index + 1 == breaks.len();
        let range_start = previous.map_or(0, |p| p + 1);
        let first = line_start(tokens, previous);

        let ragged = last || paragraph.kind() == ParagraphKind::Heading;
        let ratio = applied_ratio(brk, ragged);

        let mut runs: Vec<PlacedRun> = Vec::new();
        let mut x = 0.0;
        let mut joinable = false;
        let mut hyphenated = false;

        for (i, token) in tokens.iter().enumerate().take(brk.position + 1).skip(first) {
            let at_break = i == brk.position;
            match token {
                Token::Word { text, font, width } => {
                    // Pieces of one word split by an unchosen hyphen.
                    let joins = joinable && runs.last().is_some_and(|run| run.font == *font);
                    if !joins {
                        runs.push(PlacedRun {
                            x,
                            text: String::new(),
                            font: font.clone(),
                        });
                    }
                    if let Some(run) = runs.last_mut() {
                        run.text.push_str(text);
                    }
                    x += width;
                    joinable = true;
                }
                Token::Space { .. } if at_break => {}
                Token::Space {
                    width,
                    stretch,
                    shrink,
                } => {
                    let adjust = if ratio >= 0.0 { ratio * stretch } else { ratio * shrink };
                    x += width + adjust;
                    joinable = false;
                }
                Token::Penalty {
                    width,
                    flagged,
                    text,
                    ..
                } if at_break => {
                    if let Some(run) = runs.last_mut() {
                        run.text.push_str(text);
                    }
                    x += width;
                    hyphenated = *flagged;
                }
                Token::Penalty { .. } => {}
            }
        }

        let (ascent, descent, leading) = runs.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, run| {
            (
                acc.0.max(run.font.ascent()),
                acc.1.max(run.font.descent()),
                acc.2.max(run.font.leading()),
            )
        });

        let line = Line {
            paragraph: paragraph.index(),
            index,
            tokens: range_start..brk.position + 1,
            runs,
            width: x,
            ratio,
            ascent,
            descent,
            leading,
            offset,
            last,
            hyphenated,
            overfull: brk.overfull || x > widths.width(index) + 1e-6,
        };
        offset += line.height();
        lines.push(line);
        previous = Some(brk.position);
    }
    lines
}

/// Ratio used to set the glue of a line.
fn applied_ratio(brk: &Break, ragged: bool) -> f64 {
    let ratio = if brk.overfull { -1.0 } else { brk.ratio };
    if !ratio.is_finite() {
        0.0
    } else if ragged {
        ratio.min(0.0)
    } else {
        ratio
    }
}
