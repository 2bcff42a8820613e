//! Directed connection between two nodes
//!
//! An undirected logical edge is stored as two connections, one per
//! direction, both owned by the same graph.

use super::types::{ConnectionId, GraphId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directed edge owned by a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique identifier for this connection
    pub(crate) id: ConnectionId,

    /// Source node (connection goes FROM this node)
    pub(crate) from: NodeId,

    /// Target node (connection goes TO this node)
    pub(crate) to: NodeId,

    pub(crate) weight: f64,

    /// Graph that owns this connection
    pub(crate) graph: GraphId,
}

impl Connection {
    pub(crate) fn new(
        id: ConnectionId,
        from: NodeId,
        to: NodeId,
        weight: f64,
        graph: GraphId,
    ) -> Self {
        Connection {
            id,
            from,
            to,
            weight,
            graph,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    pub fn graph(&self) -> GraphId {
        self.graph
    }

    /// Structural comparison: same endpoints and same weight, whatever the ids
    pub fn same_as(&self, other: &Connection) -> bool {
        self.weight == other.weight && self.from == other.from && self.to == other.to
    }

    /// Check if this connection joins two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.from == node1 && self.to == node2) || (self.from == node2 && self.to == node1)
    }

    /// Check if this connection touches a node at either end
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from.0, self.weight, self.to.0)
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

impl std::hash::Hash for Connection {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
