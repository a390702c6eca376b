//! CLI logic for the frlayout graph layout tool.
//!
//! This module contains the core CLI logic: load configuration, read a graph
//! description, lay it out, and write the result as SVG or TOML.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;
use serde::Serialize;

use frlayout::{FrLayoutError, LayoutBuilder, graph::Graph};

/// Run the frlayout CLI application
///
/// This function processes the input file through the layout pipeline and
/// writes the result to the output file in the requested format.
///
/// # Errors
///
/// Returns `FrLayoutError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), FrLayoutError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config.layout_mut().set_seed(Some(seed));
    }
    if let Some(iterations) = args.iterations {
        app_config.layout_mut().set_iterations(iterations);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let mut graph = builder.parse(&source)?;
    builder.layout(&mut graph)?;

    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&graph)?,
        OutputFormat::Toml => render_toml(&graph)?,
    };
    fs::write(&args.output, output)?;

    info!(output_file = args.output, format:? = args.format; "Layout exported successfully");

    Ok(())
}

#[derive(Debug, Serialize)]
struct LayoutDocument {
    node: Vec<PlacedNode>,
    edge: Vec<RoutedEdge>,
}

#[derive(Debug, Serialize)]
struct PlacedNode {
    id: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Serialize)]
struct RoutedEdge {
    source: String,
    target: String,
    start: [f64; 2],
    end: [f64; 2],
}

/// Serialize node positions and edge sections as a TOML document.
fn render_toml(graph: &Graph) -> Result<String, FrLayoutError> {
    let document = LayoutDocument {
        node: graph
            .nodes()
            .map(|node| PlacedNode {
                id: node.id().as_string(),
                x: node.position().x(),
                y: node.position().y(),
                width: node.size().width(),
                height: node.size().height(),
            })
            .collect(),
        edge: graph
            .edges()
            .iter()
            .filter_map(|edge| {
                let section = edge.section()?;
                Some(RoutedEdge {
                    source: edge.source().as_string(),
                    target: edge.target().as_string(),
                    start: [section.start().x(), section.start().y()],
                    end: [section.end().x(), section.end().y()],
                })
            })
            .collect(),
    };
    toml::to_string(&document).map_err(|err| FrLayoutError::Export(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_lists_nodes_and_edges() {
        let builder = LayoutBuilder::default();
        let mut graph = builder
            .parse("[[node]]\nid = \"x\"\n[[node]]\nid = \"y\"\n[[edge]]\nsource = \"x\"\ntarget = \"y\"\n")
            .unwrap();
        builder.layout(&mut graph).unwrap();

        let output = render_toml(&graph).unwrap();
        let parsed: toml::Table = toml::from_str(&output).unwrap();
        assert_eq!(parsed["node"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["edge"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["node"][0]["id"].as_str(), Some("x"));
        assert_eq!(parsed["node"][1]["width"].as_float(), Some(30.0));
    }
}
