//! Essay markup and paragraph building.
//!
//! The input is plain text: blocks separated by blank lines, `# ` headings,
//! `*italic*` and `**bold**` spans. [`parse_blocks`] splits it into
//! [`Block`]s and [`ParagraphBuilder`] turns a block into the token stream
//! the line breaker consumes.

use crate::error::TypesetError;
use crate::font::{Font, FontSet};
use crate::hyphenation::Hyphenator;
use crate::token::{Paragraph, ParagraphKind, Token};

/// Font name used for body text.
pub const ROMAN: &str = "roman";
/// Font name used for `*italic*` spans.
pub const ITALIC: &str = "italic";
/// Font name used for `**bold**` spans.
pub const BOLD: &str = "bold";
/// Font name used for `# ` headings.
pub const TITLE: &str = "title";

const SOFT_HYPHEN: char = '\u{AD}';

/// Emphasis of a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Roman,
    Italic,
    Bold,
}

impl Emphasis {
    fn font_name(self) -> &'static str {
        match self {
            Emphasis::Roman => ROMAN,
            Emphasis::Italic => ITALIC,
            Emphasis::Bold => BOLD,
        }
    }
}

/// A run of text with one emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

/// A paragraph or heading of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: ParagraphKind,
    pub spans: Vec<Span>,
}

impl Block {
    /// Text of the block without markup.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Split essay text into blocks.
///
/// Lines of one paragraph are joined with a space. A line starting with
/// `# ` is a heading block on its own.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    fn flush(pending: &mut Vec<&str>, blocks: &mut Vec<Block>) {
        if !pending.is_empty() {
            blocks.push(Block {
                kind: ParagraphKind::Body,
                spans: parse_spans(&pending.join(" ")),
            });
            pending.clear();
        }
    }

    let mut blocks = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            flush(&mut pending, &mut blocks);
        } else if let Some(title) = line.strip_prefix("# ") {
            flush(&mut pending, &mut blocks);
            blocks.push(Block {
                kind: ParagraphKind::Heading,
                spans: vec![Span {
                    text: title.trim().to_string(),
                    emphasis: Emphasis::Roman,
                }],
            });
        } else {
            pending.push(line);
        }
    }
    flush(&mut pending, &mut blocks);
    blocks
}

/// Split a paragraph into emphasis spans.
///
/// A marker only opens a span when a matching closer follows; otherwise the
/// asterisks are kept as text.
fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut emphasis = Emphasis::Roman;
    let mut rest = text;

    while !rest.is_empty() {
        let (marker, target) = if rest.starts_with("**") {
            ("**", Emphasis::Bold)
        } else if rest.starts_with('*') {
            ("*", Emphasis::Italic)
        } else {
            let c = rest.chars().next().unwrap_or_default();
            current.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        };

        let after = &rest[marker.len()..];
        let toggles = if emphasis == target {
            true
        } else {
            emphasis == Emphasis::Roman && after.contains(marker)
        };
        if toggles {
            if !current.is_empty() {
                spans.push(Span {
                    text: std::mem::take(&mut current),
                    emphasis,
                });
            }
            emphasis = if emphasis == target {
                Emphasis::Roman
            } else {
                target
            };
        } else {
            current.push_str(marker);
        }
        rest = after;
    }
    if !current.is_empty() {
        spans.push(Span {
            text: current,
            emphasis,
        });
    }
    spans
}

/// Turns blocks into paragraphs of tokens.
#[derive(Debug, Clone)]
pub struct ParagraphBuilder<'a> {
    fonts: &'a FontSet,
    hyphenator: Option<Hyphenator<'a>>,
    indent: f64,
    hyphen_penalty: f64,
}

impl<'a> ParagraphBuilder<'a> {
    pub fn new(fonts: &'a FontSet) -> Self {
        Self {
            fonts,
            hyphenator: None,
            indent: 0.0,
            hyphen_penalty: 50.0,
        }
    }

    /// Insert discretionary hyphens found by `hyphenator`.
    pub fn with_hyphenator(mut self, hyphenator: Hyphenator<'a>) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }

    /// First-line indent of body paragraphs in points.
    pub fn with_indent(mut self, indent: f64) -> Self {
        self.indent = indent;
        self
    }

    /// Cost of breaking at a hyphen.
    pub fn with_hyphen_penalty(mut self, cost: f64) -> Self {
        self.hyphen_penalty = cost;
        self
    }

    fn font_for(&self, kind: ParagraphKind, emphasis: Emphasis) -> Result<&'a Font, TypesetError> {
        let preferred = match kind {
            ParagraphKind::Heading => TITLE,
            ParagraphKind::Body => emphasis.font_name(),
        };
        match self.fonts.get(preferred) {
            Some(font) => Ok(font),
            None => self.fonts.require(ROMAN),
        }
    }

    /// Build the paragraph at `index` from a block.
    pub fn build(&self, block: &Block, index: usize) -> Result<Paragraph, TypesetError> {
        let mut tokens = Vec::new();
        if block.kind == ParagraphKind::Body && self.indent > 0.0 {
            tokens.push(Token::glue(self.indent, 0.0, 0.0));
        }

        // Words may cross span boundaries ("**bold**," ends in roman).
        let mut words: Vec<Vec<(String, &'a Font)>> = Vec::new();
        let mut in_word = false;
        for span in &block.spans {
            let font = self.font_for(block.kind, span.emphasis)?;
            for c in span.text.chars() {
                if c.is_whitespace() {
                    in_word = false;
                    continue;
                }
                if !in_word {
                    words.push(Vec::new());
                    in_word = true;
                }
                if let Some(word) = words.last_mut() {
                    let same_font = word.last().is_some_and(|(_, f)| std::ptr::eq(*f, font));
                    if !same_font {
                        word.push((String::new(), font));
                    }
                    if let Some((text, _)) = word.last_mut() {
                        text.push(c);
                    }
                }
            }
        }

        let hyphenate = block.kind == ParagraphKind::Body;
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                if let Some((_, font)) = words[i - 1].last() {
                    tokens.push(Token::space(font));
                }
            }
            for (text, font) in word {
                self.push_segment(&mut tokens, text, font, hyphenate);
            }
        }

        Ok(Paragraph::new(index, block.kind, tokens))
    }

    /// Push the tokens of one single-font piece of a word.
    fn push_segment(&self, tokens: &mut Vec<Token>, text: &str, font: &Font, hyphenate: bool) {
        let parts: Vec<&str> = text.split_inclusive('-').collect();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                tokens.push(Token::penalty(self.hyphen_penalty));
            }
            match self.hyphenator.filter(|_| hyphenate) {
                _ if part.contains(SOFT_HYPHEN) => self.push_soft_hyphenated(tokens, part, font),
                Some(hyphenator) => self.push_hyphenated(tokens, part, font, &hyphenator),
                None => tokens.push(Token::word(*part, font)),
            }
        }
    }

    /// Soft hyphens placed by the author replace the pattern breaks.
    fn push_soft_hyphenated(&self, tokens: &mut Vec<Token>, part: &str, font: &Font) {
        let pieces = part.split(SOFT_HYPHEN).filter(|piece| !piece.is_empty());
        for (i, piece) in pieces.enumerate() {
            if i > 0 {
                tokens.push(Token::hyphen(font, self.hyphen_penalty));
            }
            tokens.push(Token::word(piece, font));
        }
    }

    fn push_hyphenated(
        &self,
        tokens: &mut Vec<Token>,
        part: &str,
        font: &Font,
        hyphenator: &Hyphenator<'_>,
    ) {
        // Punctuation around the letters is never hyphenated.
        let core_start = part.find(char::is_alphabetic).unwrap_or(part.len());
        let core_end = part
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_alphabetic())
            .map_or(core_start, |(i, c)| i + c.len_utf8())
            .max(core_start);

        let syllables = hyphenator.hyphenate_word(&part[core_start..core_end]);
        let mut last = 0;
        let mut end = core_start;
        if let Some((_, leading)) = syllables.split_last() {
            for syllable in leading {
                end += syllable.len();
                tokens.push(Token::word(&part[last..end], font));
                tokens.push(Token::hyphen(font, self.hyphen_penalty));
                last = end;
            }
        }
        tokens.push(Token::word(&part[last..], font));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontSpec, FontStyle};
    use crate::hyphenation::Patterns;

    fn fonts() -> FontSet {
        FontSet::standard(&[
            FontSpec::new(ROMAN, "Times", FontStyle::Regular, 10.0),
            FontSpec::new(ITALIC, "Times", FontStyle::Italic, 10.0),
            FontSpec::new(BOLD, "Times", FontStyle::Bold, 10.0),
            FontSpec::new(TITLE, "Times", FontStyle::Bold, 18.0),
        ])
        .unwrap()
    }

    fn words(paragraph: &Paragraph) -> Vec<String> {
        paragraph
            .tokens()
            .iter()
            .filter_map(|t| match t {
                Token::Word { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    // ========== parse_blocks ==========

    #[test]
    fn blank_lines_separate_paragraphs() {
        let blocks = parse_blocks("one\ntwo\n\n\nthree\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "one two");
        assert_eq!(blocks[1].plain_text(), "three");
    }

    #[test]
    fn heading_is_its_own_block() {
        let blocks = parse_blocks("# On Spacing\nBody text.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, ParagraphKind::Heading);
        assert_eq!(blocks[0].plain_text(), "On Spacing");
        assert_eq!(blocks[1].kind, ParagraphKind::Body);
    }

    #[test]
    fn emphasis_spans() {
        let blocks = parse_blocks("plain *slanted* and **heavy** text");
        let spans = &blocks[0].spans;
        assert_eq!(spans.len(), 5);
        assert_eq!(spans[1].text, "slanted");
        assert_eq!(spans[1].emphasis, Emphasis::Italic);
        assert_eq!(spans[3].text, "heavy");
        assert_eq!(spans[3].emphasis, Emphasis::Bold);
        assert_eq!(spans[4].emphasis, Emphasis::Roman);
    }

    #[test]
    fn unmatched_asterisk_is_text() {
        let blocks = parse_blocks("a * b");
        assert_eq!(blocks[0].spans.len(), 1);
        assert_eq!(blocks[0].plain_text(), "a * b");
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(parse_blocks("\n  \n").is_empty());
    }

    // ========== ParagraphBuilder ==========

    #[test]
    fn words_and_spaces_alternate() {
        let fonts = fonts();
        let block = &parse_blocks("a quick fox")[0];
        let paragraph = ParagraphBuilder::new(&fonts).build(block, 4).unwrap();
        assert_eq!(paragraph.index(), 4);
        assert_eq!(words(&paragraph), vec!["a", "quick", "fox"]);
        let tokens = paragraph.tokens();
        assert!(tokens[0].is_word());
        assert!(tokens[1].is_space());
        assert!(tokens.last().unwrap().is_forced_break());
    }

    #[test]
    fn indent_is_rigid_glue() {
        let fonts = fonts();
        let block = &parse_blocks("text")[0];
        let paragraph = ParagraphBuilder::new(&fonts)
            .with_indent(18.0)
            .build(block, 0)
            .unwrap();
        assert_eq!(paragraph.tokens()[0], Token::glue(18.0, 0.0, 0.0));
    }

    #[test]
    fn hyphenation_inserts_flagged_penalties() {
        let fonts = fonts();
        let patterns = Patterns::english();
        let block = &parse_blocks("hyphenation.")[0];
        let paragraph = ParagraphBuilder::new(&fonts)
            .with_hyphenator(Hyphenator::new(&patterns))
            .build(block, 0)
            .unwrap();
        assert_eq!(words(&paragraph), vec!["hy", "phen", "ation."]);
        let flagged = paragraph
            .tokens()
            .iter()
            .filter(|t| matches!(t, Token::Penalty { flagged: true, .. }))
            .count();
        assert_eq!(flagged, 2);
    }

    #[test]
    fn leading_punctuation_stays_with_word() {
        let fonts = fonts();
        let patterns = Patterns::english();
        let block = &parse_blocks("(hyphenation)")[0];
        let paragraph = ParagraphBuilder::new(&fonts)
            .with_hyphenator(Hyphenator::new(&patterns))
            .build(block, 0)
            .unwrap();
        assert_eq!(words(&paragraph), vec!["(hy", "phen", "ation)"]);
    }

    #[test]
    fn soft_hyphens_override_patterns() {
        let fonts = fonts();
        let patterns = Patterns::english();
        let block = &parse_blocks("co\u{AD}operation")[0];
        let paragraph = ParagraphBuilder::new(&fonts)
            .with_hyphenator(Hyphenator::new(&patterns))
            .build(block, 0)
            .unwrap();
        assert_eq!(words(&paragraph), vec!["co", "operation"]);
        assert!(matches!(
            paragraph.tokens()[1],
            Token::Penalty { flagged: true, .. }
        ));
    }

    #[test]
    fn explicit_hyphen_is_unflagged_break() {
        let fonts = fonts();
        let block = &parse_blocks("well-known")[0];
        let paragraph = ParagraphBuilder::new(&fonts).build(block, 0).unwrap();
        assert_eq!(words(&paragraph), vec!["well-", "known"]);
        assert!(matches!(
            paragraph.tokens()[1],
            Token::Penalty { flagged: false, width, .. } if width == 0.0
        ));
    }

    #[test]
    fn emphasis_selects_font() {
        let fonts = fonts();
        let block = &parse_blocks("plain *slanted*")[0];
        let paragraph = ParagraphBuilder::new(&fonts).build(block, 0).unwrap();
        let names: Vec<&str> = paragraph
            .tokens()
            .iter()
            .filter_map(|t| t.font().map(Font::name))
            .collect();
        assert_eq!(names, vec!["Times-Roman", "Times-Italic"]);
    }

    #[test]
    fn punctuation_after_emphasis_joins_word() {
        let fonts = fonts();
        let block = &parse_blocks("**bold**, then")[0];
        let paragraph = ParagraphBuilder::new(&fonts).build(block, 0).unwrap();
        let tokens = paragraph.tokens();
        assert_eq!(tokens[0].font().unwrap().name(), "Times-Bold");
        assert_eq!(tokens[1].font().unwrap().name(), "Times-Roman");
        assert!(tokens[2].is_space());
    }

    #[test]
    fn heading_uses_title_font_without_hyphenation() {
        let fonts = fonts();
        let patterns = Patterns::english();
        let block = &parse_blocks("# hyphenation")[0];
        let paragraph = ParagraphBuilder::new(&fonts)
            .with_hyphenator(Hyphenator::new(&patterns))
            .with_indent(18.0)
            .build(block, 0)
            .unwrap();
        assert_eq!(paragraph.kind(), ParagraphKind::Heading);
        assert_eq!(words(&paragraph), vec!["hyphenation"]);
        assert_eq!(paragraph.tokens()[0].font().unwrap().size(), 18.0);
    }

    #[test]
    fn missing_roman_font_fails() {
        let fonts = FontSet::new();
        let block = &parse_blocks("text")[0];
        assert!(matches!(
            ParagraphBuilder::new(&fonts).build(block, 0),
            Err(TypesetError::FontMetricsMissing { .. })
        ));
    }
}
