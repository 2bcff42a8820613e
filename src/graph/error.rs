//! Error type shared by every graph operation

use super::types::{ConnectionId, EntityKind, GraphId, NodeId};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Every variant is a precondition violation reported before the operation
/// mutates anything.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("{} not in graph {graph}", MissingNodes(.nodes))]
    NodeNotInGraph { nodes: Vec<NodeId>, graph: GraphId },

    #[error("node {0} already exists, try another id")]
    NodeAlreadyExists(NodeId),

    #[error("connection {0} already exists, try another id")]
    ConnectionAlreadyExists(ConnectionId),

    #[error("graph {0} already exists, try another id")]
    GraphAlreadyExists(GraphId),

    #[error("graph {0} already has nodes")]
    GraphAlreadyHasNodes(GraphId),

    #[error("node {node} already belongs to graph {graph}")]
    NodeAlreadyInAGraph { node: NodeId, graph: GraphId },

    #[error("{0} is not a graph")]
    InvalidOperand(GraphId),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Connection {0} not found")]
    ConnectionNotFound(ConnectionId),

    #[error("Graph {0} not found")]
    GraphNotFound(GraphId),

    #[error("{count} consecutive {kind} ids starting at {start} do not fit in the id space")]
    IdRangeOverflow {
        kind: EntityKind,
        start: u64,
        count: usize,
    },

    #[error("adjacency matrix is not square: row {row} has {found} columns, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl GraphError {
    /// Identifier collision for the given namespace
    pub fn already_exists(kind: EntityKind, id: u64) -> Self {
        match kind {
            EntityKind::Node => GraphError::NodeAlreadyExists(NodeId(id)),
            EntityKind::Connection => GraphError::ConnectionAlreadyExists(ConnectionId(id)),
            EntityKind::Graph => GraphError::GraphAlreadyExists(GraphId(id)),
        }
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

struct MissingNodes<'a>(&'a [NodeId]);

impl fmt::Display for MissingNodes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            [] => write!(f, "entered nodes are"),
            [single] => write!(f, "{} is", single),
            many => {
                let ids: Vec<String> = many.iter().map(|id| id.to_string()).collect();
                write!(f, "{} are", ids.join(", "))
            }
        }
    }
}
