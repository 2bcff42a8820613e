//! Adjacency-matrix import and export
//!
//! A matrix is square and row-major: `matrix[i][j] == 1` means a directed
//! connection from the node of row `i` to the node of row `j`. Any other value
//! means "no connection". Matrices carry no weights, so imported connections
//! get weight 1.

use super::error::{GraphError, GraphResult};
use super::session::Session;
use super::types::{EntityKind, GraphId, NodeId, NodeState};
use rustc_hash::FxHashMap;
use tracing::info;

/// Square 0/1 adjacency matrix
pub type AdjacencyMatrix = Vec<Vec<u8>>;

const MATRIX_EDGE_WEIGHT: f64 = 1.0;

/// How imported rows are given node identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeOrdering {
    /// Let the registry generate ids
    #[default]
    Generated,
    /// Row `i` becomes node `start + i`
    Sequential { start: u64 },
}

impl Session {
    /// Populate an empty graph from an adjacency matrix.
    ///
    /// Every `1` becomes a directed connection regardless of the graph's own
    /// directionality. Returns the created nodes in row order.
    pub fn matrix_to_graph<R: AsRef<[u8]>>(
        &mut self,
        graph_id: GraphId,
        matrix: &[R],
        ordering: NodeOrdering,
    ) -> GraphResult<Vec<NodeId>> {
        if !self.graph_or_err(graph_id)?.is_empty() {
            return Err(GraphError::GraphAlreadyHasNodes(graph_id));
        }

        let expected = matrix.len();
        for (row, line) in matrix.iter().enumerate() {
            let found = line.as_ref().len();
            if found != expected {
                return Err(GraphError::MatrixNotSquare {
                    row,
                    expected,
                    found,
                });
            }
        }

        let nodes: Vec<NodeId> = match ordering {
            NodeOrdering::Generated => (0..expected).map(|_| self.create_node()).collect(),
            NodeOrdering::Sequential { start } => {
                let ids = self.sequential_node_ids(start, expected)?;
                for &id in &ids {
                    self.create_node_with_id(id)?;
                }
                ids
            }
        };
        for &id in &nodes {
            if let Some(node) = self.get_node_mut(id) {
                node.set_state(NodeState::White);
            }
            self.include_node(graph_id, id)?;
        }

        let mut created = 0usize;
        for (row, line) in matrix.iter().enumerate() {
            for (column, &cell) in line.as_ref().iter().enumerate() {
                if cell == 1 {
                    self.add_connection(
                        graph_id,
                        nodes[row],
                        nodes[column],
                        MATRIX_EDGE_WEIGHT,
                        Some(true),
                    )?;
                    created += 1;
                }
            }
        }

        info!(
            "Imported {}x{} adjacency matrix into graph {} ({} connections)",
            expected, expected, graph_id, created
        );
        Ok(nodes)
    }

    /// `count` consecutive node ids from `start`, all of them free
    fn sequential_node_ids(&self, start: u64, count: usize) -> GraphResult<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(count);
        for offset in 0..count as u64 {
            let id = start
                .checked_add(offset)
                .ok_or(GraphError::IdRangeOverflow {
                    kind: EntityKind::Node,
                    start,
                    count,
                })?;
            if self.registry().contains(EntityKind::Node, id) {
                return Err(GraphError::NodeAlreadyExists(NodeId(id)));
            }
            ids.push(NodeId(id));
        }
        Ok(ids)
    }

    /// Export a graph as an adjacency matrix, rows and columns in node order
    pub fn graph_to_matrix(&self, graph_id: GraphId) -> GraphResult<AdjacencyMatrix> {
        let graph = self.graph_or_err(graph_id)?;
        let index: FxHashMap<NodeId, usize> = graph
            .nodes()
            .enumerate()
            .map(|(position, id)| (id, position))
            .collect();

        let mut matrix = vec![vec![0u8; index.len()]; index.len()];
        for connection_id in graph.connections() {
            if let Some(connection) = self.get_connection(connection_id) {
                if let (Some(&row), Some(&column)) =
                    (index.get(&connection.from()), index.get(&connection.to()))
                {
                    matrix[row][column] = 1;
                }
            }
        }
        Ok(matrix)
    }
}
