//! Graph algorithms module
//!
//! Analysis methods live in `impl Session` blocks, one file per family:
//! - `pathfinding`: BFS, distances, diameter, extreme nodes
//! - `degree`: degree averages, density, parity, Euler-walk check
//! - `topology`: local clustering coefficient
//!
//! [`Session::statistics`] gathers the scalar metrics into one summary.

pub mod degree;
pub mod pathfinding;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use pathfinding::PairDistance;

use crate::graph::{GraphId, GraphResult, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Summary of a graph's scalar metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub order: usize,
    pub size: usize,
    pub is_directional: bool,
    pub average_degree: Option<f64>,
    pub density: Option<f64>,
    pub diameter: Option<usize>,
    pub average_distance: Option<f64>,
    pub odd_degree_nodes: usize,
    pub euler_walk: bool,
    pub average_clustering: Option<f64>,
}

impl Session {
    /// Compute every scalar metric for a graph
    pub fn statistics(&mut self, graph_id: GraphId) -> GraphResult<GraphStatistics> {
        let graph = self.graph_or_err(graph_id)?;
        let (order, size, is_directional) = (graph.order(), graph.size(), graph.is_directional());

        let stats = GraphStatistics {
            order,
            size,
            is_directional,
            average_degree: self.average_degree(graph_id)?,
            density: self.density(graph_id)?,
            diameter: self.diameter(graph_id)?,
            average_distance: self.average_distance(graph_id)?,
            odd_degree_nodes: self.odd_degree_nodes(graph_id)?.len(),
            euler_walk: self.euler_walk(graph_id)?,
            average_clustering: self.average_clustering_coefficient(graph_id)?,
        };

        info!(
            "Statistics for graph {}: order={}, size={}, diameter={:?}",
            graph_id, stats.order, stats.size, stats.diameter
        );
        Ok(stats)
    }
}
