pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jax-resolve")]
#[command(about = "Resolve ipfs and ipns paths against a local block store")]
pub struct Args {
    /// Path to the state directory (defaults to ~/.jax-resolve)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: crate::Command,
}
