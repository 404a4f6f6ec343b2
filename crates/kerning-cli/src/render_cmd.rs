use std::path::Path;

use kerning::typeset_to_pdf;

use crate::cli::LayoutArgs;
use crate::shared::{fail, load_options, load_patterns, read_input, report_warnings};

pub fn run(args: &LayoutArgs, output: &Path) -> Result<(), i32> {
    let options = load_options(args)?;
    let patterns = load_patterns(args.patterns.as_deref())?;
    let text = read_input(&args.input)?;

    let summary =
        typeset_to_pdf(&text, &options, &args.fonts, &patterns, output).map_err(|e| fail(&e))?;
    report_warnings(&summary);

    println!(
        "Wrote {} page(s), {} line(s) to {}",
        summary.pages,
        summary.lines,
        output.display()
    );
    Ok(())
}
