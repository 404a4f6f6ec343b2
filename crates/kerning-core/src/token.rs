//! Paragraph tokens: words, glue and penalties.

use crate::font::Font;

/// Penalty cost that forces a break.
pub const FORCED_BREAK: f64 = -10_000.0;
/// Penalty cost that forbids a break.
pub const FORBIDDEN_BREAK: f64 = 10_000.0;
/// Stretch of the glue that ends every paragraph.
pub const FINISHING_STRETCH: f64 = 1.0e6;

/// One element of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A run of text that is never split except at a penalty.
    Word {
        text: String,
        font: Font,
        /// Natural width in points.
        width: f64,
    },
    /// Inter-word glue.
    Space {
        width: f64,
        stretch: f64,
        shrink: f64,
    },
    /// A possible break. `flagged` marks a discretionary hyphen whose `text`
    /// (of `width` points) is set at the end of the line when chosen.
    Penalty {
        width: f64,
        cost: f64,
        flagged: bool,
        text: String,
    },
}

impl Token {
    /// A word measured with `font`.
    pub fn word(text: impl Into<String>, font: &Font) -> Self {
        let text = text.into();
        let width = font.width_of(&text);
        Token::Word {
            text,
            font: font.clone(),
            width,
        }
    }

    /// Inter-word glue sized from the font's space: stretch ½, shrink ⅓.
    pub fn space(font: &Font) -> Self {
        let width = font.char_width(' ');
        Token::Space {
            width,
            stretch: width / 2.0,
            shrink: width / 3.0,
        }
    }

    /// Glue with explicit dimensions.
    pub fn glue(width: f64, stretch: f64, shrink: f64) -> Self {
        Token::Space {
            width,
            stretch,
            shrink,
        }
    }

    /// A discretionary hyphen in `font`.
    pub fn hyphen(font: &Font, cost: f64) -> Self {
        Token::Penalty {
            width: font.char_width('-'),
            cost,
            flagged: true,
            text: "-".to_string(),
        }
    }

    /// A zero-width unflagged break opportunity.
    pub fn penalty(cost: f64) -> Self {
        Token::Penalty {
            width: 0.0,
            cost,
            flagged: false,
            text: String::new(),
        }
    }

    /// Glue that fills the rest of the last line.
    pub fn finishing_glue() -> Self {
        Token::glue(0.0, FINISHING_STRETCH, 0.0)
    }

    /// A penalty that forces a break.
    pub fn forced_break() -> Self {
        Token::penalty(FORCED_BREAK)
    }

    /// Natural width in points.
    pub fn width(&self) -> f64 {
        match self {
            Token::Word { width, .. } | Token::Space { width, .. } | Token::Penalty { width, .. } => {
                *width
            }
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word { .. })
    }

    pub fn is_space(&self) -> bool {
        matches!(self, Token::Space { .. })
    }

    /// Whether this is a penalty that forces a break.
    pub fn is_forced_break(&self) -> bool {
        matches!(self, Token::Penalty { cost, .. } if *cost <= FORCED_BREAK)
    }

    /// The font of a word token.
    pub fn font(&self) -> Option<&Font> {
        match self {
            Token::Word { font, .. } => Some(font),
            _ => None,
        }
    }
}

/// What kind of block a paragraph came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParagraphKind {
    /// Justified body text.
    #[default]
    Body,
    /// A ragged-right heading.
    Heading,
}

/// An immutable token sequence for one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    index: usize,
    kind: ParagraphKind,
    tokens: Vec<Token>,
}

impl Paragraph {
    /// Create a paragraph, ending it with finishing glue and a forced break
    /// unless the tokens already end with a forced break.
    ///
    /// The finishing glue sits behind a forbidden break so it is never a
    /// breakpoint itself.
    pub fn new(index: usize, kind: ParagraphKind, mut tokens: Vec<Token>) -> Self {
        while tokens.last().is_some_and(Token::is_space) {
            tokens.pop();
        }
        if !tokens.last().is_some_and(Token::is_forced_break) {
            tokens.push(Token::penalty(FORBIDDEN_BREAK));
            tokens.push(Token::finishing_glue());
            tokens.push(Token::forced_break());
        }
        Self {
            index,
            kind,
            tokens,
        }
    }

    /// Position of this paragraph in the document (0-based).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> ParagraphKind {
        self.kind
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether the paragraph holds no words.
    pub fn is_blank(&self) -> bool {
        !self.tokens.iter().any(Token::is_word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courier() -> Font {
        Font::standard("Courier", 10.0).unwrap()
    }

    #[test]
    fn word_is_measured() {
        let token = Token::word("word", &courier());
        assert!((token.width() - 24.0).abs() < 1e-9);
        assert!(token.is_word());
    }

    #[test]
    fn space_glue_ratios() {
        match Token::space(&courier()) {
            Token::Space {
                width,
                stretch,
                shrink,
            } => {
                assert!((width - 6.0).abs() < 1e-9);
                assert!((stretch - 3.0).abs() < 1e-9);
                assert!((shrink - 2.0).abs() < 1e-9);
            }
            other => panic!("expected space, got {other:?}"),
        }
    }

    #[test]
    fn hyphen_is_flagged() {
        let token = Token::hyphen(&courier(), 50.0);
        assert!(matches!(token, Token::Penalty { flagged: true, .. }));
        assert!(!token.is_forced_break());
    }

    #[test]
    fn paragraph_gets_finishing_glue() {
        let font = courier();
        let tokens = vec![Token::word("a", &font), Token::space(&font)];
        let paragraph = Paragraph::new(0, ParagraphKind::Body, tokens);
        let tokens = paragraph.tokens();
        assert_eq!(tokens.len(), 4);
        assert!(matches!(tokens[1], Token::Penalty { cost, .. } if cost == FORBIDDEN_BREAK));
        assert!(matches!(tokens[2], Token::Space { stretch, .. } if stretch == FINISHING_STRETCH));
        assert!(tokens[3].is_forced_break());
    }

    #[test]
    fn blank_paragraph() {
        let paragraph = Paragraph::new(0, ParagraphKind::Body, Vec::new());
        assert!(paragraph.is_blank());
    }
}
