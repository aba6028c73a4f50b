//! Workshops: provision and sync workshop proceedings repositories.
//!
//! # Usage
//!
//! ```text
//! workshops [--skip-existing] [--config <path>] [--json]
//! ```
//!
//! Reads the coordination sheet, then forks, configures and updates one
//! GitHub repository per workshop row. Set `RUST_LOG=debug` to see the diff
//! of every file before it is written.

mod clients;
mod commands;
mod console;
mod credentials;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::sync::SyncArgs;

#[derive(Parser, Debug)]
#[command(
    name = "workshops",
    version,
    about = "Create and update workshop proceedings repositories from the coordination sheet",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli.sync.run()
}
