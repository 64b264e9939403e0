pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "santa")]
#[command(about = "Draw Secret Santa pairs and seal each result to its giver's SSH key")]
pub struct Args {
    /// Path to a santa.toml config file (defaults to ./santa.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG still applies
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
