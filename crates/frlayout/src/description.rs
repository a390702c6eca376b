//! Graph description files
//!
//! A graph description is a TOML document listing nodes and edges:
//!
//! ```toml
//! [[node]]
//! id = "gateway"
//! width = 60.0
//! height = 30.0
//!
//! [[node]]
//! id = "service"
//!
//! [[edge]]
//! source = "gateway"
//! target = "service"
//! ```
//!
//! `width` and `height` default to 30. A node without an `id` is named
//! after its position in the file (`__0`, `__1`, ...), with a `_<n>` suffix
//! when an explicit id already takes that name.

use std::collections::HashSet;

use log::debug;
use serde::Deserialize;

use frlayout_core::{
    geometry::Size,
    graph::{Edge, Graph, Node},
    identifier::Id,
};

use crate::error::FrLayoutError;

const DEFAULT_NODE_EXTENT: f64 = 30.0;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDescription {
    #[serde(default, rename = "node")]
    nodes: Vec<NodeDescription>,
    #[serde(default, rename = "edge")]
    edges: Vec<EdgeDescription>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeDescription {
    id: Option<String>,
    #[serde(default = "default_extent")]
    width: f64,
    #[serde(default = "default_extent")]
    height: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeDescription {
    source: String,
    target: String,
}

fn default_extent() -> f64 {
    DEFAULT_NODE_EXTENT
}

/// Parse a TOML graph description into a [`Graph`].
///
/// # Errors
///
/// Returns [`FrLayoutError::Parse`] for malformed TOML or unknown keys, and
/// [`FrLayoutError::Graph`] for duplicate node ids, edges naming unknown
/// nodes, or negative or non-finite node sizes.
pub fn parse_graph(source: &str) -> Result<Graph, FrLayoutError> {
    let description: GraphDescription =
        toml::from_str(source).map_err(|err| FrLayoutError::new_parse_error(&err, source))?;

    let explicit: HashSet<String> = description
        .nodes
        .iter()
        .filter_map(|node| node.id.clone())
        .collect();

    let mut graph = Graph::new();
    for (index, node) in description.nodes.into_iter().enumerate() {
        let id = match node.id.as_deref() {
            Some(name) => Id::new(name),
            None => anonymous_id(index, &explicit),
        };
        let valid_extent = |value: f64| value.is_finite() && value >= 0.0;
        if !valid_extent(node.width) || !valid_extent(node.height) {
            return Err(FrLayoutError::Graph(format!(
                "node `{id}` has invalid size {}x{}",
                node.width, node.height
            )));
        }
        graph.add_node(Node::new(id, Size::new(node.width, node.height)))?;
    }

    for edge in description.edges {
        graph.add_edge(Edge::new(Id::new(&edge.source), Id::new(&edge.target)))?;
    }

    debug!(
        node_count = graph.node_count(),
        edge_count = graph.edges().len();
        "Graph description parsed"
    );
    Ok(graph)
}

/// Name for the unnamed node at `index` that no explicit id uses.
///
/// Prefers `__<index>` and falls back to `__<index>_<n>` on a clash.
fn anonymous_id(index: usize, explicit: &HashSet<String>) -> Id {
    let preferred = Id::from_anonymous(index);
    if !explicit.contains(&preferred.as_string()) {
        return preferred;
    }
    (1..)
        .map(|n| format!("{preferred}_{n}"))
        .find(|candidate| !explicit.contains(candidate))
        .map_or(preferred, |candidate| Id::new(&candidate))
}
