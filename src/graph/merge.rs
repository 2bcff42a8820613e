//! Structural copy and merge
//!
//! Copies never share nodes with their source: every source node gets a fresh
//! node (new identity, same weight and state) in the target, and every source
//! connection is reproduced as a directed connection between the fresh nodes.

use super::error::{GraphError, GraphResult};
use super::membership::GraphOptions;
use super::session::Session;
use super::types::{GraphId, NodeId, NodeState};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

impl Session {
    /// Reproduce the topology of `source` inside `target`. Returns `target`.
    pub fn copy_connections_into(
        &mut self,
        source: GraphId,
        target: GraphId,
    ) -> GraphResult<GraphId> {
        let graph = self
            .get_graph(source)
            .ok_or(GraphError::InvalidOperand(source))?;
        if !self.has_graph(target) {
            return Err(GraphError::InvalidOperand(target));
        }

        let members: Vec<(NodeId, f64, NodeState)> = graph
            .nodes()
            .filter_map(|id| self.get_node(id))
            .map(|node| (node.id(), node.weight(), node.state()))
            .collect();
        let edges: Vec<(NodeId, NodeId, f64)> = graph
            .connections()
            .filter_map(|id| self.get_connection(id))
            .map(|connection| (connection.from(), connection.to(), connection.weight()))
            .collect();

        let mut copies: FxHashMap<NodeId, NodeId> = FxHashMap::default();
        for (original, weight, state) in members {
            let copy = self.create_weighted_node(weight);
            if let Some(node) = self.get_node_mut(copy) {
                node.set_state(state);
            }
            self.include_node(target, copy)?;
            copies.insert(original, copy);
        }

        for (from, to, weight) in edges {
            if let (Some(&from), Some(&to)) = (copies.get(&from), copies.get(&to)) {
                self.add_connection(target, from, to, weight, Some(true))?;
            }
        }

        debug!(
            "Copied {} nodes from graph {} into graph {}",
            copies.len(),
            source,
            target
        );
        Ok(target)
    }

    /// Build a new graph holding independent copies of `left` and `right`.
    ///
    /// The result is directional (or weighted) if either operand is. Both
    /// operands are left untouched.
    pub fn merge(&mut self, left: GraphId, right: GraphId) -> GraphResult<GraphId> {
        let left_options = self
            .get_graph(left)
            .ok_or(GraphError::InvalidOperand(left))?
            .options();
        let right_options = self
            .get_graph(right)
            .ok_or(GraphError::InvalidOperand(right))?
            .options();

        let merged = self.create_graph(GraphOptions {
            directional: left_options.directional || right_options.directional,
            weighted: left_options.weighted || right_options.weighted,
        });
        self.copy_connections_into(left, merged)?;
        self.copy_connections_into(right, merged)?;

        info!("Merged graphs {} and {} into graph {}", left, right, merged);
        Ok(merged)
    }
}
