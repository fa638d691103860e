// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, dispatch.
// - Returns `anyhow::Result` so any failure exits non-zero with its message.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trellokit::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `-v` forces debug output; otherwise RUST_LOG decides, defaulting to warn.
    let filter = if cli.verbose {
        EnvFilter::new("trellokit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}
