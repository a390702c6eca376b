//! frlayout - Fruchterman-Reingold force-directed graph layout.
//!
//! Given a graph of sized nodes and directed edges, frlayout places every node
//! with a force simulation and routes every edge as a straight line between
//! node centers. The [`LayoutBuilder`] runs the whole pipeline against a host
//! [`Graph`](graph::Graph); the [`layout`] module exposes the simulation engine
//! and edge router for callers that manage their own graph representation.

pub mod config;
pub mod layout;

mod description;
mod error;
mod export;

pub use frlayout_core::{color, geometry, graph, identifier};

pub use error::FrLayoutError;

use std::ops::ControlFlow;

use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use config::AppConfig;
use graph::{EdgeSection, Graph};
use layout::{
    Checkpoint, EdgeRef, EdgeRouter, ForceSimulation, LogMonitor, NodeState, ProgressMonitor,
    StraightLineRouter,
};

/// Builder for parsing, laying out, and rendering graphs.
///
/// # Examples
///
/// ```rust
/// use frlayout::{LayoutBuilder, config::{AppConfig, LayoutOptions}};
///
/// let source = r#"
///     [[node]]
///     id = "client"
///
///     [[node]]
///     id = "server"
///
///     [[edge]]
///     source = "client"
///     target = "server"
/// "#;
///
/// let options = LayoutOptions::default().with_seed(Some(7));
/// let builder = LayoutBuilder::new(AppConfig::new(options, Default::default()));
///
/// let mut graph = builder.parse(source).expect("Failed to parse");
/// builder.layout(&mut graph).expect("Failed to lay out");
///
/// let svg = builder.render_svg(&graph).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML graph description into a graph.
    ///
    /// # Errors
    ///
    /// Returns `FrLayoutError::Parse` for malformed input and
    /// `FrLayoutError::Graph` for inconsistent nodes or edges.
    pub fn parse(&self, source: &str) -> Result<Graph, FrLayoutError> {
        info!("Parsing graph description");
        let graph = description::parse_graph(source)?;
        trace!(graph:?; "Parsed graph");
        Ok(graph)
    }

    /// Lay out `graph` in place.
    ///
    /// Randomness comes from the configured seed when one is set, otherwise
    /// from the thread-local generator. Progress is reported through the
    /// `log` facade.
    ///
    /// # Errors
    ///
    /// Returns `FrLayoutError::InvalidConfiguration` for a canvas without a
    /// positive area.
    pub fn layout(&self, graph: &mut Graph) -> Result<(), FrLayoutError> {
        let mut monitor = LogMonitor::new();
        let never_cancel = |_: usize| ControlFlow::<()>::Continue(());
        match self.config.layout().seed() {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.layout_with(graph, &mut rng, &mut monitor, never_cancel)
            }
            None => self.layout_with(graph, &mut rand::rng(), &mut monitor, never_cancel),
        }
    }

    /// Lay out `graph` in place with explicit randomness, progress reporting,
    /// and cancellation.
    ///
    /// Node positions and edge sections are written back into `graph`; when
    /// `checkpoint` cancels the simulation the positions reached so far are
    /// written back instead of the final ones.
    ///
    /// # Errors
    ///
    /// Returns `FrLayoutError::InvalidConfiguration` for a canvas without a
    /// positive area.
    pub fn layout_with<R, M, C>(
        &self,
        graph: &mut Graph,
        rng: &mut R,
        monitor: &mut M,
        checkpoint: C,
    ) -> Result<(), FrLayoutError>
    where
        R: Rng + ?Sized,
        M: ProgressMonitor + ?Sized,
        C: Checkpoint,
    {
        let options = self.config.layout();
        let engine = ForceSimulation::new(options.simulation_config())?;
        let canvas = engine.config().canvas();

        monitor.begin("Force-directed layout", 2);
        monitor.log("Algorithm began");
        graph.set_size(canvas);

        debug!(
            padding:? = options.padding(),
            spacing_edge_edge = options.spacing_edge_edge(),
            spacing_edge_node = options.spacing_edge_node(),
            spacing_node_node = options.spacing_node_node();
            "Spacing options are accepted but not applied"
        );

        let nodes: Vec<NodeState> = graph.nodes().map(NodeState::from_node).collect();
        let edges = resolve_edges(graph)?;
        info!(
            iterations = options.iterations(),
            node_count = nodes.len(),
            edge_count = edges.len();
            "Laying out graph"
        );

        monitor.begin("Node placement", nodes.len());
        let positions = engine.simulate_with(&nodes, &edges, rng, checkpoint)?;
        for (node, position) in graph.nodes_mut().zip(&positions) {
            node.set_position(*position);
            monitor.worked(1);
        }
        monitor.done();
        monitor.log("Node placement done");

        monitor.begin("Edge routing", edges.len());
        let placed: Vec<NodeState> = nodes
            .into_iter()
            .zip(positions)
            .map(|(node, position)| node.with_position(position))
            .collect();
        let routes = StraightLineRouter::new().route(&placed, &edges)?;
        for (edge, route) in graph.edges_mut().iter_mut().zip(routes) {
            edge.set_section(EdgeSection::new(route.start(), route.end()));
            monitor.worked(1);
        }
        monitor.done();
        monitor.log("Edge routing done");

        graph.set_size(canvas);
        monitor.log("Algorithm executed");
        monitor.done();
        Ok(())
    }

    /// Render a laid-out graph to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `FrLayoutError::Export` if a configured style color is invalid.
    pub fn render_svg(&self, graph: &Graph) -> Result<String, FrLayoutError> {
        info!(node_count = graph.node_count(); "Rendering SVG");
        export::svg::render(graph, self.config.style())
    }
}

/// Translates id-based edges into indices into the graph's node order.
fn resolve_edges(graph: &Graph) -> Result<Vec<EdgeRef>, FrLayoutError> {
    graph
        .edges()
        .iter()
        .map(|edge| -> Result<EdgeRef, FrLayoutError> {
            let index_of = |id| {
                graph.node_index(id).ok_or_else(|| {
                    FrLayoutError::Graph(format!("edge references unknown node `{id}`"))
                })
            };
            Ok(EdgeRef::new(
                index_of(edge.source())?,
                index_of(edge.target())?,
            ))
        })
        .collect()
}
