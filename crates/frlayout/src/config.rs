//! Configuration types for frlayout.
//!
//! This module provides the configuration structures that control how graphs
//! are laid out and styled. All types implement [`serde::Deserialize`] so the
//! CLI can load them from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutOptions`] - Every option the force-directed layout recognizes.
//! - [`StyleConfig`] - Colors used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use frlayout::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().iterations(), 50);
//! assert!(!config.layout().reverse_input());
//! assert_eq!(config.layout().canvas_width(), 500.0);
//! ```

use serde::Deserialize;

use frlayout_core::{
    color::Color,
    geometry::{Insets, Size},
};

use crate::layout::SimulationConfig;

/// Top-level configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutOptions, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns a mutable reference to the layout configuration.
    pub fn layout_mut(&mut self) -> &mut LayoutOptions {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Options recognized by the force-directed layout.
///
/// `padding` and the three spacing values are accepted so host configuration
/// carrying them loads cleanly, but the layout does not apply them
/// geometrically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutOptions {
    iterations: usize,
    reverse_input: bool,
    canvas_width: f64,
    canvas_height: f64,
    initial_temperature: f64,
    seed: Option<u64>,
    padding: Insets,
    spacing_edge_edge: f64,
    spacing_edge_node: f64,
    spacing_node_node: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            iterations: 50,
            reverse_input: false,
            canvas_width: 500.0,
            canvas_height: 500.0,
            initial_temperature: 50.0,
            seed: None,
            padding: Insets::uniform(10.0),
            spacing_edge_edge: 5.0,
            spacing_edge_node: 10.0,
            spacing_node_node: 10.0,
        }
    }
}

impl LayoutOptions {
    /// Number of simulation iterations
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether nodes take their initial random draws in reverse input order
    pub fn reverse_input(&self) -> bool {
        self.reverse_input
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Displacement cap of the first iteration
    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Fixed random seed; `None` means a fresh seed per layout
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn spacing_edge_edge(&self) -> f64 {
        self.spacing_edge_edge
    }

    pub fn spacing_edge_node(&self) -> f64 {
        self.spacing_edge_node
    }

    pub fn spacing_node_node(&self) -> f64 {
        self.spacing_node_node
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_reverse_input(mut self, reverse_input: bool) -> Self {
        self.reverse_input = reverse_input;
        self
    }

    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Builds the engine configuration from these options.
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig::new(Size::new(self.canvas_width, self.canvas_height))
            .with_iterations(self.iterations)
            .with_reverse_order(self.reverse_input)
            .with_initial_temperature(self.initial_temperature)
    }
}

/// Visual styling configuration for rendered layouts.
///
/// Fields that are not set fall back to exporter defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    background_color: Option<String>,
    node_fill_color: Option<String>,
    stroke_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color("background", self.background_color.as_deref())
    }

    /// Returns the parsed node fill [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn node_fill_color(&self) -> Result<Option<Color>, String> {
        parse_color("node fill", self.node_fill_color.as_deref())
    }

    /// Returns the parsed stroke [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn stroke_color(&self) -> Result<Option<Color>, String> {
        parse_color("stroke", self.stroke_color.as_deref())
    }
}

fn parse_color(name: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {name} color in config: {err}"))
}
