//! Command-line argument definitions for the Ferry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Flags given here override the matching entries of the
//! configuration file.

use clap::Parser;

/// Command-line arguments for the Ferry sequence diagram exporter
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Directory the diagram is saved to
    #[arg(short = 'd', long)]
    pub directory: Option<String>,

    /// Base name of the saved file, without extension
    #[arg(short, long)]
    pub name: Option<String>,

    /// Replace an existing file instead of picking a free name
    #[arg(long)]
    pub overwrite: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the export transcript to stdout
    #[arg(long)]
    pub transcript: bool,
}
