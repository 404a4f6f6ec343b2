//! Performance benchmarks for kerning.
//!
//! Covers the Knuth-Plass breaker on a single long paragraph and the full
//! pipeline (markup to PDF bytes) on a multi-page essay.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kerning::kerning_core::{ParagraphBuilder, break_paragraph, parse_blocks};
use kerning::{FontSet, Hyphenator, Patterns, TypesetOptions, typeset_to_bytes};

const SENTENCES: &[&str] = &[
    "Good typography is invisible and the reader should never notice the mechanics of the page.",
    "Every paragraph is the outcome of thousands of small decisions about where each line should end.",
    "A global method considers every feasible breakpoint at once and chooses the least total demerits.",
    "Hyphenation supplies additional breakpoints inside words so narrow columns stay evenly spaced.",
];

fn essay(paragraphs: usize, sentences: usize) -> String {
    let mut text = String::from("# A Benchmark Essay\n\n");
    for p in 0..paragraphs {
        let body: Vec<&str> = (0..sentences).map(|s| SENTENCES[(p + s) % SENTENCES.len()]).collect();
        text.push_str(&body.join(" "));
        text.push_str("\n\n");
    }
    text
}

fn bench_line_breaking(c: &mut Criterion) {
    let options = TypesetOptions::default();
    let fonts = FontSet::standard(&options.fonts).unwrap();
    let patterns = Patterns::english();
    let text = essay(1, 40);
    let blocks = parse_blocks(&text);
    let builder = ParagraphBuilder::new(&fonts).with_hyphenator(Hyphenator::new(&patterns));
    let paragraph = builder.build(&blocks[1], 1).unwrap();
    let widths = options.line_widths();

    c.bench_function("break_paragraph_40_sentences", |b| {
        b.iter(|| break_paragraph(black_box(&paragraph), &widths, &options.breaking).unwrap())
    });
}

fn bench_hyphenation(c: &mut Criterion) {
    let patterns = Patterns::english();
    let hyphenator = Hyphenator::new(&patterns);
    let words: Vec<&str> = SENTENCES.iter().flat_map(|s| s.split_whitespace()).collect();

    c.bench_function("hyphenate_words", |b| {
        b.iter(|| {
            for word in &words {
                black_box(hyphenator.hyphenate_word(black_box(word)));
            }
        })
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let patterns = Patterns::english();
    let text = essay(60, 6);
    let options = TypesetOptions {
        columns: 2,
        ..TypesetOptions::default()
    };

    c.bench_function("typeset_to_bytes_two_columns", |b| {
        b.iter(|| typeset_to_bytes(black_box(&text), &options, &[], &patterns).unwrap())
    });
}

criterion_group!(
    benches,
    bench_line_breaking,
    bench_hyphenation,
    bench_end_to_end
);
criterion_main!(benches);
