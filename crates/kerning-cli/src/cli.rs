use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

/// Typeset plain-text essays into paginated, justified PDF.
#[derive(Debug, Parser)]
#[command(name = "kerning", about, version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides this
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Typeset an essay into a PDF file
    Render {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Path of the PDF to write
        #[arg(short, long, value_name = "PDF")]
        output: PathBuf,
    },

    /// Lay out an essay and print the draw calls without writing a PDF
    Layout {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show the hyphenation points of words
    Hyphenate {
        /// Words to hyphenate
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,

        /// TeX pattern file to use instead of the built-in English patterns
        #[arg(long, value_name = "FILE")]
        patterns: Option<PathBuf>,

        /// Minimum characters before a hyphen (default: 2)
        #[arg(long, default_value_t = 2)]
        left_min: usize,

        /// Minimum characters after a hyphen (default: 2)
        #[arg(long, default_value_t = 2)]
        right_min: usize,
    },
}

/// Input and option flags shared by `render` and `layout`.
#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Path to the essay text file ('-' reads standard input)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// JSON options file; flags below override its fields
    #[arg(long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    /// TrueType font file to load (repeatable)
    #[arg(long = "font", value_name = "TTF")]
    pub fonts: Vec<PathBuf>,

    /// Font family for every style (e.g. 'Times', or a loaded TrueType family)
    #[arg(long)]
    pub family: Option<String>,

    /// Body text size in points
    #[arg(long)]
    pub size: Option<f64>,

    /// Paper size
    #[arg(long, value_enum)]
    pub paper: Option<Paper>,

    /// Number of columns per page
    #[arg(long)]
    pub columns: Option<usize>,

    /// Line breaking tolerance for the first pass (raises the retry tolerance if needed)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Text drawn at the top of every page
    #[arg(long)]
    pub header: Option<String>,

    /// Disable hyphenation
    #[arg(long)]
    pub no_hyphenate: bool,

    /// Disable widow and orphan control
    #[arg(long)]
    pub no_widow_control: bool,

    /// Do not draw page numbers
    #[arg(long)]
    pub no_page_numbers: bool,

    /// TeX pattern file to use instead of the built-in English patterns
    #[arg(long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,
}

/// Paper sizes.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Paper {
    /// US Letter, 612 × 792 pt
    Letter,
    /// A4, 595 × 842 pt
    A4,
}

/// Output format for `layout`.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
