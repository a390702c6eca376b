//! Edge routing
//!
//! Routers turn final node positions into one [`EdgeRoute`] per edge.

use log::trace;

use super::{EdgeRef, EdgeRoute, NodeState, validate_edges};
use crate::error::FrLayoutError;

/// Trait defining the interface for edge routers
pub trait EdgeRouter {
    /// Compute one route per edge, in the order of `edges`.
    ///
    /// # Errors
    ///
    /// Returns [`FrLayoutError::InvalidEdgeReference`] if an edge points past
    /// the end of `nodes`.
    fn route(&self, nodes: &[NodeState], edges: &[EdgeRef])
    -> Result<Vec<EdgeRoute>, FrLayoutError>;
}

/// Routes every edge as a straight line between the centers of its endpoints.
///
/// Lines may cross nodes and other edges; spacing settings are not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineRouter;

impl StraightLineRouter {
    pub fn new() -> Self {
        Self
    }
}

impl EdgeRouter for StraightLineRouter {
    fn route(
        &self,
        nodes: &[NodeState],
        edges: &[EdgeRef],
    ) -> Result<Vec<EdgeRoute>, FrLayoutError> {
        validate_edges(edges, nodes.len())?;

        Ok(edges
            .iter()
            .map(|edge| {
                let source = &nodes[edge.source()];
                let target = &nodes[edge.target()];
                trace!(
                    source = source.id().as_string(),
                    target = target.id().as_string();
                    "Routing edge"
                );
                EdgeRoute::new(source.center(), target.center())
            })
            .collect())
    }
}
