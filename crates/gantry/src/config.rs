//! Configuration types for Gantry diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Spacing, padding, and an optional flow-direction default.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use gantry::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use gantry_core::{color::Color, semantic::Direction};

fn default_horizontal_spacing() -> f32 {
    50.0
}

fn default_vertical_spacing() -> f32 {
    50.0
}

fn default_cluster_padding() -> f32 {
    20.0
}

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing and flow settings for the layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Optional default flow direction for diagrams built by the CLI.
    #[serde(default)]
    direction: Option<Direction>,

    /// Horizontal gap between sibling symbols.
    #[serde(default = "default_horizontal_spacing")]
    horizontal_spacing: f32,

    /// Vertical gap between layout layers.
    #[serde(default = "default_vertical_spacing")]
    vertical_spacing: f32,

    /// Inner padding of cluster boxes.
    #[serde(default = "default_cluster_padding")]
    cluster_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: None,
            horizontal_spacing: default_horizontal_spacing(),
            vertical_spacing: default_vertical_spacing(),
            cluster_padding: default_cluster_padding(),
        }
    }
}

impl LayoutConfig {
    /// Configured default [`Direction`], if any.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn cluster_padding(&self) -> f32 {
        self.cluster_padding
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background [`Color`] for diagrams, as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}
