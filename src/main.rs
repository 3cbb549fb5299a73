// CLI binary entry point for musictag

mod cli;

use clap::Parser;
use cli::Config;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::parse();
    init_logging(config.verbose);

    if let Err(e) = cli::run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr so stdout only carries command output
///
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
