mod build;
mod target;
mod toolchain;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Setup logging based on the verbose flag or the RUST_LOG environment variable.
fn setup_logging(verbose: bool) {
    // RUST_LOG env var takes precedence if set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("go_cross=debug")
    } else {
        EnvFilter::new("go_cross=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Parser)]
#[command(
    name = "go-cross",
    about = "Cross-compile a Go package for a fixed matrix of platforms",
    version
)]
struct Cli {
    #[command(flatten)]
    build: build::BuildOpts,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    build::run(&cli.build)
}
