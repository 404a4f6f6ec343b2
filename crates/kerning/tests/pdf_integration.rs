//! Integration tests: typeset essays to PDF and read the result back with lopdf.

use std::path::PathBuf;

use kerning::{Patterns, TypesetError, TypesetOptions, typeset_to_bytes, typeset_to_pdf};

/// Two 144 × 60pt columns of 10pt Courier: five four-letter words per
/// line, five lines per column.
fn two_columns() -> TypesetOptions {
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
        hyphenate: false,
        fonts: TypesetOptions::font_family("Courier", 10.0),
        ..TypesetOptions::default()
    }
}

fn paragraph(letter: char, words: usize) -> String {
    (0..words)
        .map(|i| format!("{letter}{i:03}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn page_texts(pdf: &[u8]) -> Vec<String> {
    let doc = lopdf::Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|id| String::from_utf8_lossy(&doc.get_page_content(*id).unwrap()).into_owned())
        .collect()
}

#[test]
fn three_paragraphs_produce_two_pdf_pages() {
    let text = format!(
        "{}\n\n{}\n\n{}\n",
        paragraph('a', 23),
        paragraph('b', 12),
        paragraph('c', 30)
    );
    let rendered = typeset_to_bytes(&text, &two_columns(), &[], &Patterns::english()).unwrap();
    assert_eq!(rendered.summary.pages, 2);

    let pages = page_texts(&rendered.pdf);
    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("(a000) Tj"));
    assert!(pages[0].contains("(b011) Tj"));
    assert!(pages[1].contains("(c029) Tj"));
    assert!(!pages[1].contains("(a000) Tj"));
}

#[test]
fn coordinates_are_flipped_to_pdf_space() {
    // First baseline: top margin 36 + ascent 8 = 44 from the top; 132 - 44 = 88.
    let rendered =
        typeset_to_bytes("a000 a001", &two_columns(), &[], &Patterns::english()).unwrap();
    let pages = page_texts(&rendered.pdf);
    assert!(pages[0].contains("/F1 10 Tf 36 88 Td (a000) Tj"), "{}", pages[0]);
}

#[test]
fn default_options_render_page_number() {
    let rendered = typeset_to_bytes(
        "# Title\n\nSome text for the body of the essay.",
        &TypesetOptions::default(),
        &[],
        &Patterns::english(),
    )
    .unwrap();
    let pages = page_texts(&rendered.pdf);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("(Title) Tj"));
    assert!(pages[0].contains("(1) Tj"));
}

#[test]
fn typeset_to_pdf_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("essay.pdf");
    let summary = typeset_to_pdf(
        "Words on a page.",
        &TypesetOptions::a4(),
        &[],
        &Patterns::english(),
        &output,
    )
    .unwrap();
    assert_eq!(summary.pages, 1);

    let doc = lopdf::Document::load_mem(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn missing_font_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("essay.pdf");
    let fonts = vec![PathBuf::from("/nonexistent/GenBasR.ttf")];
    let err = typeset_to_pdf(
        "Words on a page.",
        &TypesetOptions::default(),
        &fonts,
        &Patterns::english(),
        &output,
    )
    .unwrap_err();
    assert!(matches!(err, TypesetError::FontLoadError { .. }));
    assert!(!output.exists());
}

#[test]
fn unresolvable_paragraph_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("essay.pdf");
    let mut options = TypesetOptions {
        page_width: 20.0 + 72.0,
        columns: 1,
        ..two_columns()
    };
    options.breaking.emergency_pass = false;
    let err = typeset_to_pdf("aa bb", &options, &[], &Patterns::english(), &output).unwrap_err();
    assert!(matches!(err, TypesetError::NoFeasibleBreak { .. }));
    assert!(!output.exists());
}
