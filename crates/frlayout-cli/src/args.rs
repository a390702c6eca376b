//! Command-line argument definitions for the frlayout CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, output format, layout overrides, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Output written by the CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rendered SVG drawing
    #[default]
    Svg,
    /// TOML listing of node positions and edge sections
    Toml,
}

/// Command-line arguments for the frlayout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph description (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Seed for the layout's random number generator, overriding the config
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulation iterations, overriding the config
    #[arg(long)]
    pub iterations: Option<usize>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
