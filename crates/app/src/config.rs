//! Command-line configuration for the huffpack tool.
//!
//! All file access happens here in the front end; the codec itself only
//! sees in-memory buffers.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

/// Default size of a generated sample file (64 KiB)
pub const DEFAULT_SAMPLE_BYTES: usize = 64 * 1024;

#[derive(Debug, Parser)]
#[command(name = "huffpack", version)]
#[command(about = "Huffman compression with a self-describing header", long_about = None)]
pub struct Config {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a file
    Encode {
        input: PathBuf,
        output: PathBuf,
        /// Print a compression summary
        #[arg(long)]
        stats: bool,
    },
    /// Restore a file compressed with `encode`
    Decode { input: PathBuf, output: PathBuf },
    /// Print the header and code table of a compressed file
    Inspect { input: PathBuf },
    /// Write a sample file with mixed compressibility
    Sample {
        output: PathBuf,
        /// Size in bytes
        #[arg(long, default_value_t = DEFAULT_SAMPLE_BYTES)]
        size: usize,
        /// Random seed for a reproducible sample (default: time-based)
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Config {
    /// Log level implied by the `-v` count.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
