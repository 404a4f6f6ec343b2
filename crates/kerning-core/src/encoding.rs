//! WinAnsiEncoding (Windows code page 1252) for simple PDF fonts.
//!
//! Width tables in [`crate::standard_fonts`] and loaded TrueType faces are
//! indexed by WinAnsi codes, so measuring text and emitting content streams
//! both go through [`encode_char`].
//!
//! Codes 0x20–0x7E match ASCII, 0xA0–0xFF match Latin-1, and 0x80–0x9F hold
//! typographic punctuation. Codes 0x81, 0x8D, 0x8F, 0x90 and 0x9D are
//! undefined.

/// Characters at codes 0x80–0x9F, `None` where undefined.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80 Euro
    None,             // 0x81
    Some('\u{201A}'), // 0x82 quotesinglbase
    Some('\u{0192}'), // 0x83 florin
    Some('\u{201E}'), // 0x84 quotedblbase
    Some('\u{2026}'), // 0x85 ellipsis
    Some('\u{2020}'), // 0x86 dagger
    Some('\u{2021}'), // 0x87 daggerdbl
    Some('\u{02C6}'), // 0x88 circumflex
    Some('\u{2030}'), // 0x89 perthousand
    Some('\u{0160}'), // 0x8A Scaron
    Some('\u{2039}'), // 0x8B guilsinglleft
    Some('\u{0152}'), // 0x8C OE
    None,             // 0x8D
    Some('\u{017D}'), // 0x8E Zcaron
    None,             // 0x8F
    None,             // 0x90
    Some('\u{2018}'), // 0x91 quoteleft
    Some('\u{2019}'), // 0x92 quoteright
    Some('\u{201C}'), // 0x93 quotedblleft
    Some('\u{201D}'), // 0x94 quotedblright
    Some('\u{2022}'), // 0x95 bullet
    Some('\u{2013}'), // 0x96 endash
    Some('\u{2014}'), // 0x97 emdash
    Some('\u{02DC}'), // 0x98 tilde
    Some('\u{2122}'), // 0x99 trademark
    Some('\u{0161}'), // 0x9A scaron
    Some('\u{203A}'), // 0x9B guilsinglright
    Some('\u{0153}'), // 0x9C oe
    None,             // 0x9D
    Some('\u{017E}'), // 0x9E zcaron
    Some('\u{0178}'), // 0x9F Ydieresis
];

/// Map a Unicode character to its WinAnsi byte code.
///
/// Returns `None` for characters the encoding cannot represent (CJK, most
/// symbols, control characters other than tab).
pub fn encode_char(c: char) -> Option<u8> {
    let cp = c as u32;
    match cp {
        0x20..=0x7E | 0xA0..=0xFF => Some(cp as u8),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|&entry| entry == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// Map a WinAnsi byte code back to its Unicode character.
pub fn decode_byte(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        0x80..=0x9F => HIGH_CONTROL_RANGE[(code - 0x80) as usize],
        _ => None,
    }
}

/// Encode a string, substituting `?` for unencodable characters.
///
/// Returns the bytes and the number of substituted characters.
pub fn encode_lossy(text: &str) -> (Vec<u8>, usize) {
    let mut bytes = Vec::with_capacity(text.len());
    let mut substituted = 0;
    for c in text.chars() {
        match encode_char(c) {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(b'?');
                substituted += 1;
            }
        }
    }
    (bytes, substituted)
}
