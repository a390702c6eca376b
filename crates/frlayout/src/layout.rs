//! Force-directed layout
//!
//! The layout runs in two phases:
//!
//! 1. [`ForceSimulation`] places nodes by simulating repulsion between every
//!    pair of nodes and attraction along every edge, under a cooling schedule
//!    that caps how far a node may move per iteration.
//! 2. An [`EdgeRouter`] derives a straight line per edge from the final node
//!    positions.
//!
//! Both phases work on plain index-based inputs ([`NodeState`], [`EdgeRef`]) so
//! they stay independent of the host graph representation.

mod progress;
mod routing;
mod simulation;

pub use progress::{LogMonitor, NoopMonitor, ProgressMonitor};
pub use routing::{EdgeRouter, StraightLineRouter};
pub use simulation::{Checkpoint, ForceSimulation};

use frlayout_core::{
    geometry::{Size, Vector2},
    graph::Node,
    identifier::Id,
};

use crate::error::FrLayoutError;

/// Working state of one node during a layout
#[derive(Debug, Clone, PartialEq)]
pub struct NodeState {
    id: Id,
    position: Vector2,
    size: Size,
}

impl NodeState {
    /// Creates a node state at the origin
    pub fn new(id: Id, width: f64, height: f64) -> Self {
        Self {
            id,
            position: Vector2::zero(),
            size: Size::new(width, height),
        }
    }

    /// Captures a host graph node
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id(),
            position: node.position(),
            size: node.size(),
        }
    }

    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = position;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Top-left corner of the node's box
    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn width(&self) -> f64 {
        self.size.width()
    }

    pub fn height(&self) -> f64 {
        self.size.height()
    }

    /// Center of the node's box
    pub fn center(&self) -> Vector2 {
        self.position.box_center(self.size)
    }
}

/// A directed edge given as indices into the node list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef {
    source: usize,
    target: usize,
}

impl EdgeRef {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    pub fn source(self) -> usize {
        self.source
    }

    pub fn target(self) -> usize {
        self.target
    }

    pub fn is_self_loop(self) -> bool {
        self.source == self.target
    }
}

/// Straight-line route of one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRoute {
    start: Vector2,
    end: Vector2,
}

impl EdgeRoute {
    pub fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    pub fn start(self) -> Vector2 {
        self.start
    }

    pub fn end(self) -> Vector2 {
        self.end
    }
}

/// Parameters of a [`ForceSimulation`] run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    canvas: Size,
    iterations: usize,
    reverse_order: bool,
    initial_temperature: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(Size::new(500.0, 500.0))
    }
}

impl SimulationConfig {
    /// Creates a configuration for the given canvas with default tuning:
    /// 50 iterations, input order, and an initial temperature of 50.
    pub fn new(canvas: Size) -> Self {
        Self {
            canvas,
            iterations: 50,
            reverse_order: false,
            initial_temperature: 50.0,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_reverse_order(mut self, reverse_order: bool) -> Self {
        self.reverse_order = reverse_order;
        self
    }

    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Area node positions are confined to, anchored at the origin
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn reverse_order(&self) -> bool {
        self.reverse_order
    }

    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }
}

/// Checks that every edge endpoint indexes into a list of `node_count` nodes.
fn validate_edges(edges: &[EdgeRef], node_count: usize) -> Result<(), FrLayoutError> {
    for (edge, edge_ref) in edges.iter().enumerate() {
        for index in [edge_ref.source, edge_ref.target] {
            if index >= node_count {
                return Err(FrLayoutError::InvalidEdgeReference {
                    edge,
                    index,
                    node_count,
                });
            }
        }
    }
    Ok(())
}
