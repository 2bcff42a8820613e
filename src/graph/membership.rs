//! Graph membership record
//!
//! A graph owns its member nodes (exclusively) and the connections between
//! them. Both sets are insertion ordered, which fixes the iteration order every
//! analysis uses.

use super::types::{ConnectionId, GraphId, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Flags chosen at graph creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Store only the forward connection for each added edge
    pub directional: bool,
    /// Advisory only; distances stay unweighted
    pub weighted: bool,
}

impl GraphOptions {
    pub fn directed() -> Self {
        GraphOptions {
            directional: true,
            weighted: false,
        }
    }

    pub fn undirected() -> Self {
        GraphOptions::default()
    }

    pub fn with_weights(mut self) -> Self {
        self.weighted = true;
        self
    }
}

/// An owned collection of nodes and the connections between them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    pub(crate) id: GraphId,
    pub(crate) nodes: IndexSet<NodeId>,
    pub(crate) connections: IndexSet<ConnectionId>,
    pub(crate) is_directional: bool,
    pub(crate) is_weighted: bool,
}

impl Graph {
    pub(crate) fn new(id: GraphId, options: GraphOptions) -> Self {
        Graph {
            id,
            nodes: IndexSet::new(),
            connections: IndexSet::new(),
            is_directional: options.directional,
            is_weighted: options.weighted,
        }
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn is_directional(&self) -> bool {
        self.is_directional
    }

    pub fn set_directional(&mut self, directional: bool) {
        self.is_directional = directional;
    }

    pub fn is_weighted(&self) -> bool {
        self.is_weighted
    }

    pub fn set_weighted(&mut self, weighted: bool) {
        self.is_weighted = weighted;
    }

    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            directional: self.is_directional,
            weighted: self.is_weighted,
        }
    }

    /// Number of member nodes
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored (directed) connections
    pub fn size(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn contains_connection(&self, connection: ConnectionId) -> bool {
        self.connections.contains(&connection)
    }

    /// Member nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Connections in insertion order
    pub fn connections(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.connections.iter().copied()
    }

    /// The subset of `candidates` that are not members, deduplicated, in the order given
    pub(crate) fn missing_nodes(&self, candidates: &[NodeId]) -> Vec<NodeId> {
        let mut missing: Vec<NodeId> = Vec::new();
        for node in candidates {
            if !self.nodes.contains(node) && !missing.contains(node) {
                missing.push(*node);
            }
        }
        missing
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Graph {}

impl std::hash::Hash for Graph {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
