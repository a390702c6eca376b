//! Error types for frlayout operations.
//!
//! This module provides the main error type [`FrLayoutError`] which covers
//! every failure the parse, layout, and export stages can report.

use std::{io, ops::Range};

use thiserror::Error;

use frlayout_core::graph::GraphError;

/// The main error type for frlayout operations.
///
/// Zero-node graphs and coincident nodes are not errors; the layout handles
/// both without reporting anything.
#[derive(Debug, Error)]
pub enum FrLayoutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A graph description could not be parsed. `span` is the byte range of
    /// the offending input when the parser could locate it.
    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Graph error: {0}")]
    Graph(String),

    #[error(
        "Invalid edge reference: edge {edge} points at node index {index}, but only {node_count} nodes exist"
    )]
    InvalidEdgeReference {
        edge: usize,
        index: usize,
        node_count: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl From<GraphError> for FrLayoutError {
    fn from(error: GraphError) -> Self {
        Self::Graph(error.to_string())
    }
}

impl FrLayoutError {
    /// Create a new `Parse` error from a TOML error and the text it was raised for.
    pub fn new_parse_error(err: &toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }
}
