use kerning::{DrawCall, layout};

use crate::cli::{LayoutArgs, OutputFormat};
use crate::shared::{fail, load_options, load_patterns, read_input, report_warnings};

pub fn run(args: &LayoutArgs, format: &OutputFormat) -> Result<(), i32> {
    let options = load_options(args)?;
    let patterns = load_patterns(args.patterns.as_deref())?;
    let text = read_input(&args.input)?;

    let (summary, calls) = layout(&text, &options, &args.fonts, &patterns).map_err(|e| fail(&e))?;

    match format {
        OutputFormat::Text => {
            report_warnings(&summary);
            println!("--- Page 1 ---");
            let mut page = 0;
            for call in &calls {
                match call {
                    DrawCall::NewPage => {
                        page += 1;
                        println!("--- Page {} ---", page + 1);
                    }
                    DrawCall::SetFont { .. } => {}
                    DrawCall::Text {
                        x,
                        y,
                        text,
                        font,
                        size,
                        ..
                    } => println!("{x:.2}\t{y:.2}\t{font}\t{size}\t{text}"),
                }
            }
            println!(
                "pages: {}, lines: {}, widows fixed: {}, orphans fixed: {}, accepted: {}",
                summary.pages,
                summary.lines,
                summary.widows_fixed,
                summary.orphans_fixed,
                summary.violations_accepted
            );
        }
        OutputFormat::Json => {
            let obj = serde_json::json!({
                "summary": summary,
                "calls": calls,
            });
            let json = serde_json::to_string_pretty(&obj).map_err(|e| {
                eprintln!("Error: failed to serialize layout: {e}");
                1
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
