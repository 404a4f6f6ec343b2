use std::io::Read;
use std::path::Path;

use kerning::{LayoutSummary, Patterns, TypesetError, TypesetOptions};

use crate::cli::{LayoutArgs, Paper};

/// Print an error to stderr and return the exit code.
pub fn fail(err: &TypesetError) -> i32 {
    eprintln!("Error: {err}");
    1
}

/// Read the essay from a file, or from standard input when the path is `-`.
pub fn read_input(path: &Path) -> Result<String, i32> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(|e| {
            eprintln!("Error: failed to read standard input: {e}");
            1
        })?;
        return Ok(text);
    }
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", path.display());
        1
    })
}

/// Load the pattern file, or the built-in English patterns.
pub fn load_patterns(path: Option<&Path>) -> Result<Patterns, i32> {
    let Some(path) = path else {
        return Ok(Patterns::english());
    };
    let text = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: failed to read patterns {}: {e}", path.display());
        1
    })?;
    Patterns::parse(&text).map_err(|e| fail(&e))
}

/// Build options from the config file (if any) and the override flags.
pub fn load_options(args: &LayoutArgs) -> Result<TypesetOptions, i32> {
    let mut options = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                eprintln!("Error: failed to read config {}: {e}", path.display());
                1
            })?;
            serde_json::from_str(&json).map_err(|e| {
                eprintln!("Error: invalid config {}: {e}", path.display());
                1
            })?
        }
        None => TypesetOptions::default(),
    };

    match args.paper {
        Some(Paper::Letter) => (options.page_width, options.page_height) = (612.0, 792.0),
        Some(Paper::A4) => (options.page_width, options.page_height) = (595.0, 842.0),
        None => {}
    }
    if let Some(columns) = args.columns {
        options.columns = columns;
    }
    if let Some(tolerance) = args.tolerance {
        options.breaking.tolerance = tolerance;
        options.breaking.relaxed_tolerance = options.breaking.relaxed_tolerance.max(tolerance);
    }
    if args.header.is_some() {
        options.header = args.header.clone();
    }
    if args.no_hyphenate {
        options.hyphenate = false;
    }
    if args.no_widow_control {
        options.avoid_widows_orphans = false;
    }
    if args.no_page_numbers {
        options.page_numbers = false;
    }

    if args.family.is_some() || args.size.is_some() {
        let roman = options.fonts.iter().find(|spec| spec.name == "roman");
        let family = args
            .family
            .clone()
            .or_else(|| roman.map(|spec| spec.family.clone()))
            .unwrap_or_else(|| "Times".to_string());
        let size = args.size.or_else(|| roman.map(|spec| spec.size)).unwrap_or(11.0);
        options.fonts = TypesetOptions::font_family(&family, size);
    }

    options.validate().map_err(|e| fail(&e))?;
    Ok(options)
}

/// Print layout warnings to stderr.
pub fn report_warnings(summary: &LayoutSummary) {
    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }
}
