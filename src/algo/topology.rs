//! Local clustering coefficient

use crate::graph::{GraphError, GraphId, GraphResult, NodeId, Session};
use rustc_hash::FxHashSet;

impl Session {
    /// Fraction of a node's neighbour pairs that are themselves connected.
    ///
    /// Neighbours are the targets of the node's outgoing connections (the node
    /// itself excluded). The possible count is `k(k-1)` for directed graphs and
    /// `k(k-1)/2` for undirected ones, where `k` is the node's degree; in the
    /// undirected case each reciprocal pair is counted once. Returns 0 when
    /// `k < 2`.
    pub fn clustering_coefficient(&self, graph_id: GraphId, node_id: NodeId) -> GraphResult<f64> {
        let graph = self.graph_or_err(graph_id)?;
        if !graph.contains_node(node_id) {
            return Err(GraphError::NodeNotInGraph {
                nodes: vec![node_id],
                graph: graph_id,
            });
        }

        let degree = self
            .get_node(node_id)
            .map(|node| node.degree())
            .unwrap_or_default();
        if degree < 2 {
            return Ok(0.0);
        }

        let neighbours: FxHashSet<NodeId> = self
            .successors(node_id)
            .into_iter()
            .filter(|&id| id != node_id)
            .collect();

        let mut linked = 0usize;
        for &neighbour in &neighbours {
            linked += self
                .successors(neighbour)
                .into_iter()
                .filter(|to| *to != neighbour && neighbours.contains(to))
                .count();
        }

        let k = degree as f64;
        let (observed, possible) = if graph.is_directional() {
            (linked as f64, k * (k - 1.0))
        } else {
            (linked as f64 / 2.0, k * (k - 1.0) / 2.0)
        };
        if possible == 0.0 {
            return Ok(0.0);
        }
        Ok(observed / possible)
    }

    /// Mean clustering coefficient over all members; `None` for an empty graph
    pub fn average_clustering_coefficient(&self, graph_id: GraphId) -> GraphResult<Option<f64>> {
        let members: Vec<NodeId> = self.graph_or_err(graph_id)?.nodes().collect();
        if members.is_empty() {
            return Ok(None);
        }
        let mut total = 0.0;
        for &node in &members {
            total += self.clustering_coefficient(graph_id, node)?;
        }
        Ok(Some(total / members.len() as f64))
    }
}
