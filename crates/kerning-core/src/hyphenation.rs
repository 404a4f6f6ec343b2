//! Liang hyphenation.
//!
//! [`Patterns`] is an immutable table of Liang patterns and exception words,
//! parsed from TeX pattern syntax. A [`Hyphenator`] borrows a table and
//! yields the legal break positions of a word as [`Syllables`].

use std::collections::HashMap;

use crate::error::TypesetError;

const ENGLISH_PATTERNS: &str = include_str!("../patterns/en-us.tex");

/// Default minimum number of characters before the first break.
pub const DEFAULT_LEFT_MIN: usize = 2;
/// Default minimum number of characters after the last break.
pub const DEFAULT_RIGHT_MIN: usize = 2;

/// A table of hyphenation patterns and exception words.
#[derive(Debug, Clone, Default)]
pub struct Patterns {
    /// Letters of a pattern (with `.` word boundaries) to its inter-letter
    /// scores. A pattern of n letters has n + 1 scores.
    patterns: HashMap<String, Vec<u8>>,
    /// Lowercase exception word to its break positions.
    exceptions: HashMap<String, Vec<usize>>,
    /// Length in characters of the longest pattern.
    max_len: usize,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Patterns,
    Exceptions,
}

impl Patterns {
    /// Parse a pattern file in TeX syntax.
    ///
    /// Accepts bare patterns (`hy3ph`, `.ach4`), `\patterns{...}` and
    /// `\hyphenation{...}` blocks, and `%` comments. Entries inside a
    /// `\hyphenation` block are exception words with explicit hyphens
    /// (`ta-ble`).
    pub fn parse(text: &str) -> Result<Self, TypesetError> {
        let mut table = Self::default();
        let mut section = Section::Patterns;

        for line in text.lines() {
            let line = line.split('%').next().unwrap_or_default();
            let line = line.replace('{', " { ").replace('}', " } ");
            for token in line.split_whitespace() {
                match token {
                    "\\patterns" | "{" => {}
                    "\\hyphenation" => section = Section::Exceptions,
                    "}" => section = Section::Patterns,
                    _ if section == Section::Exceptions => table.add_exception(token),
                    _ => table.add_pattern(token)?,
                }
            }
        }
        Ok(table)
    }

    /// The built-in compact English table.
    pub fn english() -> Self {
        // The bundled file is known to parse.
        Self::parse(ENGLISH_PATTERNS).unwrap_or_default()
    }

    /// Number of patterns in the table.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the table has no patterns and no exceptions.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.exceptions.is_empty()
    }

    /// Number of exception words.
    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    fn add_pattern(&mut self, token: &str) -> Result<(), TypesetError> {
        let mut letters = String::new();
        let mut scores = vec![0u8];
        for c in token.chars() {
            match c.to_digit(10) {
                Some(d) => {
                    if let Some(last) = scores.last_mut() {
                        *last = d as u8;
                    }
                }
                None if c.is_alphabetic() || c == '.' || c == '\'' => {
                    letters.extend(c.to_lowercase());
                    scores.push(0);
                }
                None => {
                    return Err(TypesetError::InvalidOptions(format!(
                        "malformed hyphenation pattern '{token}'"
                    )));
                }
            }
        }
        if letters.is_empty() {
            return Err(TypesetError::InvalidOptions(format!(
                "malformed hyphenation pattern '{token}'"
            )));
        }
        self.max_len = self.max_len.max(letters.chars().count());
        self.patterns.insert(letters, scores);
        Ok(())
    }

    fn add_exception(&mut self, token: &str) {
        let mut word = String::new();
        let mut positions = Vec::new();
        let mut count = 0;
        for c in token.chars() {
            if c == '-' {
                positions.push(count);
            } else {
                word.extend(c.to_lowercase());
                count += 1;
            }
        }
        self.exceptions.insert(word, positions);
    }

    /// Inter-letter scores of a lowercase word, indexed by the character
    /// offset of the break (score[k] is the score before character k).
    fn scores(&self, word: &[char]) -> Vec<u8> {
        let mut work = Vec::with_capacity(word.len() + 2);
        work.push('.');
        work.extend_from_slice(word);
        work.push('.');

        let mut points = vec![0u8; work.len() + 1];
        let mut key = String::new();
        for start in 0..work.len() {
            let stop = work.len().min(start + self.max_len);
            for end in start + 1..=stop {
                key.clear();
                key.extend(&work[start..end]);
                if let Some(pattern) = self.patterns.get(&key) {
                    for (offset, &score) in pattern.iter().enumerate() {
                        let slot = &mut points[start + offset];
                        *slot = (*slot).max(score);
                    }
                }
            }
        }
        // points[k + 1] sits between word[k - 1] and word[k].
        points[1..=word.len() + 1].to_vec()
    }
}

/// Finds legal hyphenation points using a borrowed [`Patterns`] table.
#[derive(Debug, Clone, Copy)]
pub struct Hyphenator<'p> {
    patterns: &'p Patterns,
    left_min: usize,
    right_min: usize,
}

impl<'p> Hyphenator<'p> {
    /// Create a hyphenator with the default 2/2 margins.
    pub fn new(patterns: &'p Patterns) -> Self {
        Self {
            patterns,
            left_min: DEFAULT_LEFT_MIN,
            right_min: DEFAULT_RIGHT_MIN,
        }
    }

    /// Set the minimum characters before the first and after the last break.
    pub fn with_margins(mut self, left_min: usize, right_min: usize) -> Self {
        self.left_min = left_min.max(1);
        self.right_min = right_min.max(1);
        self
    }

    /// Break positions of `word`, as character offsets in increasing order.
    ///
    /// Words that cannot be hyphenated yield nothing. Each call starts a
    /// fresh iterator.
    pub fn hyphenate(&self, word: &str) -> Syllables {
        self.try_hyphenate(word).unwrap_or_default()
    }

    /// Like [`hyphenate`](Self::hyphenate), but reports words that are too
    /// short or contain non-alphabetic characters.
    pub fn try_hyphenate(&self, word: &str) -> Result<Syllables, TypesetError> {
        let unavailable = || TypesetError::HyphenationUnavailable {
            word: word.to_string(),
        };

        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() || !chars.iter().all(|c| c.is_alphabetic()) {
            return Err(unavailable());
        }
        let lower: Vec<char> = chars.iter().flat_map(|c| c.to_lowercase()).collect();
        if lower.len() != chars.len() || chars.len() < self.left_min + self.right_min {
            return Err(unavailable());
        }

        let key: String = lower.iter().collect();
        let scores = match self.patterns.exceptions.get(&key) {
            Some(positions) => {
                let mut scores = vec![0u8; lower.len() + 1];
                for &p in positions {
                    if p < scores.len() {
                        scores[p] = 1;
                    }
                }
                scores
            }
            None => self.patterns.scores(&lower),
        };

        Ok(Syllables {
            scores,
            next: self.left_min,
            last: chars.len() - self.right_min,
        })
    }

    /// Split `word` into syllables at its break positions.
    pub fn hyphenate_word<'w>(&self, word: &'w str) -> Vec<&'w str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut breaks = self.hyphenate(word).peekable();
        for (char_idx, (byte_idx, _)) in word.char_indices().enumerate() {
            if breaks.peek() == Some(&char_idx) {
                pieces.push(&word[start..byte_idx]);
                start = byte_idx;
                breaks.next();
            }
        }
        pieces.push(&word[start..]);
        pieces
    }
}

/// Iterator over the break positions of one word.
#[derive(Debug, Clone, Default)]
pub struct Syllables {
    scores: Vec<u8>,
    next: usize,
    last: usize,
}

impl Iterator for Syllables {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.next <= self.last && self.next < self.scores.len() {
            let pos = self.next;
            self.next += 1;
            if self.scores[pos] % 2 == 1 {
                return Some(pos);
            }
        }
        None
    }
}
