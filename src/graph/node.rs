//! Graph vertex
//!
//! A node carries its identity, a traversal marker, a weight, the graph that
//! owns it (at most one) and the sets of connections leaving and reaching it.
//! Connections are owned by the graph; the node only keeps their ids for fast
//! adjacency lookup and removal.

use super::types::{ConnectionId, GraphId, NodeId, NodeState};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A vertex in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub(crate) id: NodeId,

    /// Traversal marker, reset to `Unset` after every traversal
    pub(crate) state: NodeState,

    pub(crate) weight: f64,

    /// Owning graph, if the node has been included in one
    pub(crate) graph: Option<GraphId>,

    /// Connections whose `from` is this node
    pub(crate) outgoing: IndexSet<ConnectionId>,

    /// Connections whose `to` is this node
    pub(crate) incoming: IndexSet<ConnectionId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, weight: f64) -> Self {
        Node {
            id,
            state: NodeState::Unset,
            weight,
            graph: None,
            outgoing: IndexSet::new(),
            incoming: IndexSet::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Graph this node belongs to
    pub fn graph(&self) -> Option<GraphId> {
        self.graph
    }

    /// Ids of the connections leaving this node, in insertion order
    pub fn outgoing(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.outgoing.iter().copied()
    }

    pub fn has_outgoing(&self, connection: ConnectionId) -> bool {
        self.outgoing.contains(&connection)
    }

    /// Ids of the connections arriving at this node, in insertion order
    pub fn incoming(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.incoming.iter().copied()
    }

    /// Every connection touching this node, outgoing first, each listed once
    pub(crate) fn touching(&self) -> Vec<ConnectionId> {
        let mut touching: IndexSet<ConnectionId> = self.outgoing.clone();
        touching.extend(self.incoming.iter().copied());
        touching.into_iter().collect()
    }

    /// Number of outgoing connections
    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_detached() {
        let node = Node::new(NodeId::new(1), 1.0);
        assert_eq!(node.id(), NodeId::new(1));
        assert_eq!(node.state(), NodeState::Unset);
        assert_eq!(node.weight(), 1.0);
        assert_eq!(node.graph(), None);
        assert_eq!(node.degree(), 0);
    }

    #[test]
    fn test_degree_counts_outgoing() {
        let mut node = Node::new(NodeId::new(2), 1.0);
        node.outgoing.insert(ConnectionId::new(10));
        node.outgoing.insert(ConnectionId::new(11));
        node.outgoing.insert(ConnectionId::new(10));

        assert_eq!(node.degree(), 2);
        assert!(node.has_outgoing(ConnectionId::new(11)));
        let ids: Vec<_> = node.outgoing().collect();
        assert_eq!(ids, vec![ConnectionId::new(10), ConnectionId::new(11)]);
    }

    #[test]
    fn test_touching_lists_self_loop_once() {
        let mut node = Node::new(NodeId::new(3), 1.0);
        node.outgoing.insert(ConnectionId::new(1));
        node.outgoing.insert(ConnectionId::new(2));
        node.incoming.insert(ConnectionId::new(2));
        node.incoming.insert(ConnectionId::new(5));

        assert_eq!(
            node.touching(),
            vec![ConnectionId::new(1), ConnectionId::new(2), ConnectionId::new(5)]
        );
        assert_eq!(node.degree(), 2);
    }

    #[test]
    fn test_node_equality() {
        let mut node1 = Node::new(NodeId::new(7), 1.0);
        let node2 = Node::new(NodeId::new(7), 3.5);
        let node3 = Node::new(NodeId::new(8), 1.0);

        node1.set_state(NodeState::Black);
        assert_eq!(node1, node2); // Same ID
        assert_ne!(node1, node3); // Different ID
    }
}
