// Passbook — Application Entry Point
//
// Parses CLI arguments, initializes structured logging (which never emits
// stored passwords), and dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use passbook::cli::{execute, Cli};

fn main() {
    // Initialize tracing with env filter (RUST_LOG=passbook=debug for
    // verbose output). The default level is `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passbook=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
