use std::path::Path;

use kerning::Hyphenator;

use crate::shared::load_patterns;

pub fn run(
    words: &[String],
    patterns: Option<&Path>,
    left_min: usize,
    right_min: usize,
) -> Result<(), i32> {
    let patterns = load_patterns(patterns)?;
    let hyphenator = Hyphenator::new(&patterns).with_margins(left_min, right_min);
    for word in words {
        println!("{}", hyphenator.hyphenate_word(word).join("-"));
    }
    Ok(())
}
