//! Host graph model
//!
//! [`Graph`] is the long-lived structure a layout is written back into. It
//! keeps nodes in insertion order, which is the order the layout engine sees
//! them in, and lets edges refer to their endpoints by [`Id`].
//!
//! # Example
//!
//! ```
//! # use frlayout_core::{geometry::Size, graph::{Edge, Graph, Node}, identifier::Id};
//! let mut graph = Graph::new();
//! graph.add_node(Node::new(Id::new("a"), Size::new(40.0, 20.0))).unwrap();
//! graph.add_node(Node::new(Id::new("b"), Size::new(40.0, 20.0))).unwrap();
//! graph.add_edge(Edge::new(Id::new("a"), Id::new("b"))).unwrap();
//!
//! assert_eq!(graph.node_index(Id::new("b")), Some(1));
//! assert_eq!(graph.edges().len(), 1);
//! ```

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    geometry::{Size, Vector2},
    identifier::Id,
};

/// Errors raised while building a [`Graph`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("duplicate node `{0}`")]
    DuplicateNode(Id),

    #[error("edge references unknown node `{0}`")]
    UnknownNode(Id),
}

/// A node with a box size and the top-left position assigned by a layout
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    position: Vector2,
    size: Size,
}

impl Node {
    /// Creates a node at the origin
    pub fn new(id: Id, size: Size) -> Self {
        Self {
            id,
            position: Vector2::zero(),
            size,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// Top-left corner of the node's box
    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }
}

/// Straight line an edge is drawn along
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSection {
    start: Vector2,
    end: Vector2,
}

impl EdgeSection {
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

/// A directed edge between two nodes of the same graph
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    source: Id,
    target: Id,
    section: Option<EdgeSection>,
}

impl Edge {
    /// Creates an edge that has not been routed yet
    pub fn new(source: Id, target: Id) -> Self {
        Self {
            source,
            target,
            section: None,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    /// Route assigned by the last layout, if any
    pub fn section(&self) -> Option<EdgeSection> {
        self.section
    }

    pub fn set_section(&mut self, section: EdgeSection) {
        self.section = Some(section);
    }

    /// Returns true if the edge starts and ends at the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Nodes in insertion order plus the edges between them
#[derive(Debug, Clone, Default)]
pub struct Graph {
    size: Size,
    nodes: IndexMap<Id, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with the same id exists.
    pub fn add_node(&mut self, node: Node) -> Result<usize, GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        let (index, _) = self.nodes.insert_full(node.id, node);
        Ok(index)
    }

    /// Adds an edge between two existing nodes.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint is not in the graph.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        for endpoint in [edge.source, edge.target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::UnknownNode(endpoint));
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Size of the drawing area, set by the layout
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + DoubleEndedIterator {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Node> + DoubleEndedIterator {
        self.nodes.values_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Position of every node in insertion order
    pub fn positions(&self) -> Vec<Vector2> {
        self.nodes.values().map(Node::position).collect()
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Position of the node in insertion order
    pub fn node_index(&self, id: Id) -> Option<usize> {
        self.nodes.get_index_of(&id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }
}
