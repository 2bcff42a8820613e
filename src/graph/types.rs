//! Core type definitions for the graph model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn new(id: u64) -> Self {
        NodeId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Unique identifier for a connection (directed edge)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        ConnectionId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConnectionId({})", self.0)
    }
}

impl From<u64> for ConnectionId {
    fn from(id: u64) -> Self {
        ConnectionId(id)
    }
}

/// Unique identifier for a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct GraphId(pub u64);

impl GraphId {
    pub fn new(id: u64) -> Self {
        GraphId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphId({})", self.0)
    }
}

impl From<u64> for GraphId {
    fn from(id: u64) -> Self {
        GraphId(id)
    }
}

/// Traversal marker carried by every node.
///
/// A breadth-first traversal paints every member `White`, marks discovered
/// nodes `Gray` and fully expanded nodes `Black`, then resets all of them to
/// `Unset` when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeState {
    #[default]
    Unset,
    White,
    Gray,
    Black,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeState::Unset => "unset",
            NodeState::White => "white",
            NodeState::Gray => "gray",
            NodeState::Black => "black",
        };
        write!(f, "{}", name)
    }
}

/// The three identifier namespaces kept by the identity registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    Connection,
    Graph,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Node => write!(f, "node"),
            EntityKind::Connection => write!(f, "connection"),
            EntityKind::Graph => write!(f, "graph"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "NodeId(42)");

        let id2: NodeId = 100.into();
        assert_eq!(id2.as_u64(), 100);
    }

    #[test]
    fn test_connection_id() {
        let id = ConnectionId::new(99);
        assert_eq!(id.as_u64(), 99);
        assert_eq!(format!("{}", id), "ConnectionId(99)");
    }

    #[test]
    fn test_graph_id() {
        let id: GraphId = 7.into();
        assert_eq!(format!("{}", id), "GraphId(7)");
    }

    #[test]
    fn test_node_state_default_is_unset() {
        assert_eq!(NodeState::default(), NodeState::Unset);
        assert_eq!(NodeState::Gray.to_string(), "gray");
    }

    #[test]
    fn test_id_ordering() {
        let id1 = NodeId::new(1);
        let id2 = NodeId::new(2);
        assert!(id1 < id2);
    }
}
