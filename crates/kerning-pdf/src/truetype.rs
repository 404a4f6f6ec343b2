//! TrueType font loading.
//!
//! Reads a `.ttf` file with [`ttf_parser`] and converts its metrics into a
//! [`FontFace`]: advance widths for every WinAnsi code scaled to 1/1000 em,
//! vertical metrics and the bounding box for the font descriptor, and the
//! raw font program for embedding.

use std::path::Path;

use kerning_core::encoding::decode_byte;
use kerning_core::{FontFace, FontStyle};
use ttf_parser::{Face, name_id};

use crate::error::BackendError;

/// Load a TrueType font file into a face that carries its own program.
///
/// The family comes from the name table (falling back to the file stem).
/// The style comes from the OS/2 flags; when the font sets neither flag, a
/// trailing `R`, `I`, `B`, `BI` or `IB` on the file stem decides it, so
/// `GenBasBI.ttf` loads as bold italic.
///
/// # Errors
///
/// Returns [`BackendError::Font`] if the file is missing or is not a
/// parseable TrueType font.
pub fn load_truetype(path: &Path) -> Result<FontFace, BackendError> {
    let font_error = |reason: String| BackendError::Font {
        path: path.to_path_buf(),
        reason,
    };

    if !path.is_file() {
        return Err(font_error("file not found".to_string()));
    }
    let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    let face = Face::parse(&data, 0).map_err(|e| font_error(e.to_string()))?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Font")
        .to_string();
    let (stem_family, stem_style) = split_style_suffix(&stem);

    let style = if face.is_bold() || face.is_italic() {
        FontStyle::from_flags(face.is_bold(), face.is_italic())
    } else {
        stem_style.unwrap_or(FontStyle::Regular)
    };

    let family = find_name(&face, name_id::TYPOGRAPHIC_FAMILY)
        .or_else(|| find_name(&face, name_id::FAMILY))
        .unwrap_or_else(|| stem_family.to_string());
    let name = find_name(&face, name_id::POST_SCRIPT_NAME)
        .map(|n| sanitize_name(&n))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| sanitize_name(&format!("{family}-{style}")));

    let units_per_em = f64::from(face.units_per_em());
    let scale = |units: f64| (units * 1000.0 / units_per_em).round();
    let advance = |c: char| {
        face.glyph_index(c)
            .and_then(|glyph| face.glyph_hor_advance(glyph))
            .map(|units| scale(f64::from(units)).clamp(0.0, f64::from(u16::MAX)) as u16)
    };

    let missing_width = advance('?').unwrap_or(500);
    let mut widths = [missing_width; 256];
    for (code, width) in widths.iter_mut().enumerate() {
        if let Some(units) = decode_byte(code as u8).and_then(advance) {
            *width = units;
        }
    }

    let to_glyph_space = |units: i16| scale(f64::from(units)) as i16;
    let bbox = face.global_bounding_box();
    let font_bbox = [
        to_glyph_space(bbox.x_min),
        to_glyph_space(bbox.y_min),
        to_glyph_space(bbox.x_max),
        to_glyph_space(bbox.y_max),
    ];

    tracing::debug!(
        path = %path.display(),
        font = %name,
        family = %family,
        style = %style,
        units_per_em = face.units_per_em(),
        "loaded TrueType font"
    );

    let ascent = to_glyph_space(face.ascender());
    let descent = to_glyph_space(face.descender());
    Ok(FontFace::new(name, family, style, widths)
        .with_missing_width(missing_width)
        .with_vertical_metrics(ascent, descent)
        .with_bbox(font_bbox)
        .with_program(data))
}

/// Split a style suffix off a file stem: `GenBasBI` → (`GenBas`, BoldItalic).
fn split_style_suffix(stem: &str) -> (&str, Option<FontStyle>) {
    // Two-letter suffixes first, otherwise "BI" would read as italic.
    for (suffix, style) in [
        ("BI", FontStyle::BoldItalic),
        ("IB", FontStyle::BoldItalic),
        ("B", FontStyle::Bold),
        ("I", FontStyle::Italic),
        ("R", FontStyle::Regular),
    ] {
        if let Some(base) = stem.strip_suffix(suffix) {
            if !base.is_empty() {
                return (base, Some(style));
            }
        }
    }
    (stem, None)
}

fn find_name(face: &Face<'_>, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|entry| entry.name_id == id)
        .find_map(|entry| entry.to_string())
        .filter(|name| !name.trim().is_empty())
}

/// PDF names may not contain whitespace or delimiters.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_graphic() && !"()<>[]{}/%#".contains(*c))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_font {
    //! A minimal in-memory TrueType font for tests.
    //!
    //! Glyph 0 is `.notdef`; glyphs 1..=95 map the printable ASCII range.
    //! Every glyph advances 1229/2048 em (600 in glyph space) except the
    //! space, which advances 512/2048 em (250).

    pub(crate) const UNITS_PER_EM: u16 = 2048;

    fn be16(out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&v.to_be_bytes());
    }

    fn be32(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_be_bytes());
    }

    fn head() -> Vec<u8> {
        let mut t = Vec::new();
        be32(&mut t, 0x0001_0000); // version
        be32(&mut t, 0x0001_0000); // fontRevision
        be32(&mut t, 0); // checkSumAdjustment
        be32(&mut t, 0x5F0F_3CF5); // magicNumber
        be16(&mut t, 0); // flags
        be16(&mut t, UNITS_PER_EM);
        t.extend_from_slice(&[0; 16]); // created, modified
        for v in [-100i16, -410, 1900, 1638] {
            be16(&mut t, v as u16); // xMin yMin xMax yMax
        }
        be16(&mut t, 0); // macStyle
        be16(&mut t, 8); // lowestRecPPEM
        be16(&mut t, 2); // fontDirectionHint
        be16(&mut t, 0); // indexToLocFormat
        be16(&mut t, 0); // glyphDataFormat
        assert_eq!(t.len(), 54);
        t
    }

    fn hhea(glyphs: u16) -> Vec<u8> {
        let mut t = Vec::new();
        be32(&mut t, 0x0001_0000);
        be16(&mut t, 1638); // ascender
        be16(&mut t, (-410i16) as u16); // descender
        be16(&mut t, 0); // lineGap
        be16(&mut t, 1229); // advanceWidthMax
        t.extend_from_slice(&[0; 22]);
        be16(&mut t, glyphs); // numberOfHMetrics
        assert_eq!(t.len(), 36);
        t
    }

    fn maxp(glyphs: u16) -> Vec<u8> {
        let mut t = Vec::new();
        be32(&mut t, 0x0000_5000);
        be16(&mut t, glyphs);
        t
    }

    fn hmtx(glyphs: u16) -> Vec<u8> {
        let mut t = Vec::new();
        for glyph in 0..glyphs {
            let advance = if glyph == 1 { 512 } else { 1229 };
            be16(&mut t, advance);
            be16(&mut t, 0);
        }
        t
    }

    fn cmap() -> Vec<u8> {
        let mut sub = Vec::new();
        let seg_count: u16 = 2;
        be16(&mut sub, 4); // format
        be16(&mut sub, 16 + 8 * seg_count); // length
        be16(&mut sub, 0); // language
        be16(&mut sub, seg_count * 2);
        be16(&mut sub, 4); // searchRange
        be16(&mut sub, 1); // entrySelector
        be16(&mut sub, 0); // rangeShift
        be16(&mut sub, 126); // endCode
        be16(&mut sub, 0xFFFF);
        be16(&mut sub, 0); // reservedPad
        be16(&mut sub, 32); // startCode
        be16(&mut sub, 0xFFFF);
        be16(&mut sub, 1u16.wrapping_sub(32)); // idDelta: ' ' -> glyph 1
        be16(&mut sub, 1);
        be16(&mut sub, 0); // idRangeOffset
        be16(&mut sub, 0);

        let mut t = Vec::new();
        be16(&mut t, 0); // version
        be16(&mut t, 1); // numTables
        be16(&mut t, 3); // Windows
        be16(&mut t, 1); // Unicode BMP
        be32(&mut t, 12);
        t.extend_from_slice(&sub);
        t
    }

    fn name(family: &str, postscript: &str) -> Vec<u8> {
        let strings: Vec<(u16, Vec<u8>)> = [(1u16, family), (6, postscript)]
            .into_iter()
            .map(|(id, s)| (id, s.encode_utf16().flat_map(u16::to_be_bytes).collect()))
            .collect();
        let mut t = Vec::new();
        be16(&mut t, 0); // format
        be16(&mut t, strings.len() as u16);
        be16(&mut t, 6 + 12 * strings.len() as u16); // stringOffset
        let mut offset = 0u16;
        for (id, bytes) in &strings {
            be16(&mut t, 3); // Windows
            be16(&mut t, 1); // Unicode BMP
            be16(&mut t, 0x0409); // en-US
            be16(&mut t, *id);
            be16(&mut t, bytes.len() as u16);
            be16(&mut t, offset);
            offset += bytes.len() as u16;
        }
        for (_, bytes) in &strings {
            t.extend_from_slice(bytes);
        }
        t
    }

    /// Build the font. `names` adds a name table with the given family and
    /// PostScript name.
    pub(crate) fn build(names: Option<(&str, &str)>) -> Vec<u8> {
        let glyphs = 96;
        let mut tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
            (b"cmap", cmap()),
            (b"head", head()),
            (b"hhea", hhea(glyphs)),
            (b"hmtx", hmtx(glyphs)),
            (b"maxp", maxp(glyphs)),
        ];
        if let Some((family, postscript)) = names {
            tables.push((b"name", name(family, postscript)));
        }

        let mut out = Vec::new();
        be32(&mut out, 0x0001_0000);
        be16(&mut out, tables.len() as u16);
        be16(&mut out, 0); // searchRange
        be16(&mut out, 0); // entrySelector
        be16(&mut out, 0); // rangeShift

        let mut offset = 12 + 16 * tables.len();
        let mut body = Vec::new();
        for (tag, data) in &tables {
            out.extend_from_slice(*tag);
            be32(&mut out, 0); // checksum
            be32(&mut out, offset as u32);
            be32(&mut out, data.len() as u32);
            body.extend_from_slice(data);
            while body.len() % 4 != 0 {
                body.push(0);
            }
            offset = 12 + 16 * tables.len() + body.len();
        }
        out.extend_from_slice(&body);
        out
    }
}
