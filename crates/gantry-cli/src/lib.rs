//! Gantry CLI library
//!
//! This module contains the core CLI logic for the Gantry diagram tool: it
//! builds the built-in development environment diagram and writes the SVG
//! artifact into the requested directory.

pub mod error_adapter;

mod args;
mod blueprint;
mod config;

pub use args::Args;
pub use error_adapter::ErrorAdapter;

use std::{path::PathBuf, str::FromStr};

use log::info;

use gantry::{DiagramOptions, GantryError, semantic::Direction};

/// Run the Gantry CLI application
///
/// Builds the development environment diagram and renders it into the
/// output directory. Returns the path of the written artifact.
///
/// # Errors
///
/// Returns `GantryError` for:
/// - Configuration loading errors
/// - Invalid direction arguments
/// - Layout or rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<PathBuf, GantryError> {
    info!(output_dir = args.output_dir; "Processing diagram");

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // The command line wins over the configuration file.
    let direction = match &args.direction {
        Some(raw) => Direction::from_str(raw)
            .map_err(|err| GantryError::Config(format!("invalid direction {raw:?}: {err}")))?,
        None => app_config.layout().direction().unwrap_or_default(),
    };

    let options = DiagramOptions::default().with_direction(direction);
    let diagram = blueprint::development_environment(options)?;
    let path = diagram.render_to_dir_with(&args.output_dir, &app_config)?;

    info!(output_file = path.display().to_string(); "SVG exported successfully");

    Ok(path)
}
