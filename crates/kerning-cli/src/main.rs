mod cli;
mod hyphenate_cmd;
mod layout_cmd;
mod render_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(command = ?cli.command, "parsed arguments");

    let result = match cli.command {
        cli::Commands::Render {
            ref layout,
            ref output,
        } => render_cmd::run(layout, output),
        cli::Commands::Layout {
            ref layout,
            ref format,
        } => layout_cmd::run(layout, format),
        cli::Commands::Hyphenate {
            ref words,
            ref patterns,
            left_min,
            right_min,
        } => hyphenate_cmd::run(words, patterns.as_deref(), left_min, right_min),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
