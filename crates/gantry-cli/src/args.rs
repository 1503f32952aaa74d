//! Command-line argument definitions for the Gantry CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the output directory, flow direction,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Gantry diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the diagram artifact is written into
    #[arg(short, long, default_value = ".")]
    pub output_dir: String,

    /// Flow direction (top_to_bottom, bottom_to_top, left_to_right, right_to_left)
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
