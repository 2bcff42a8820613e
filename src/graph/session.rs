//! Session: the context that owns every node, connection and graph
//!
//! Entities are addressed by typed handles (`NodeId`, `ConnectionId`,
//! `GraphId`). The session owns the identity registry and keeps the
//! cross-references between entities consistent:
//! - a node belongs to at most one graph
//! - a node's outgoing and incoming sets are exactly the connections of its
//!   graph leaving and reaching it
//! - removing a node removes every connection touching it
//!
//! Every cascade is an explicit call (`remove_node`, `remove_connection`,
//! `destroy_node`, `destroy_graph`); nothing happens on drop.

use super::connection::Connection;
use super::error::{GraphError, GraphResult};
use super::membership::{Graph, GraphOptions};
use super::node::Node;
use super::registry::IdentityRegistry;
use super::types::{ConnectionId, EntityKind, GraphId, NodeId};
use indexmap::{IndexMap, IndexSet};
use std::hash::Hash;
use tracing::debug;

/// Session-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// First identifier handed out by the registry generators
    pub first_generated_id: u64,
    /// Weight given to nodes created without an explicit weight
    pub default_node_weight: f64,
    /// Weight used by [`Session::connect`]
    pub default_connection_weight: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            first_generated_id: 1,
            default_node_weight: 1.0,
            default_connection_weight: 1.0,
        }
    }
}

/// Owner of all graph entities and of their identifiers
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,

    registry: IdentityRegistry,

    /// Node arena: NodeId -> Node
    pub(crate) nodes: IndexMap<NodeId, Node>,

    /// Connection arena: ConnectionId -> Connection
    pub(crate) connections: IndexMap<ConnectionId, Connection>,

    /// Graph arena: GraphId -> Graph
    pub(crate) graphs: IndexMap<GraphId, Graph>,
}

impl Session {
    /// Create an empty session with the default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Session {
            registry: IdentityRegistry::starting_at(config.first_generated_id),
            config,
            nodes: IndexMap::new(),
            connections: IndexMap::new(),
            graphs: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    // ============================================================
    // Nodes
    // ============================================================

    /// Create an ownerless node with a generated id
    pub fn create_node(&mut self) -> NodeId {
        let id = self.next_free_node_id();
        let weight = self.config.default_node_weight;
        self.insert_node(id, weight)
    }

    /// Create an ownerless node with a caller-chosen id
    pub fn create_node_with_id(&mut self, id: impl Into<NodeId>) -> GraphResult<NodeId> {
        let id = self.registry.allocate_node(Some(id.into()))?;
        let weight = self.config.default_node_weight;
        Ok(self.insert_node(id, weight))
    }

    /// Create an ownerless node with a generated id and the given weight
    pub fn create_weighted_node(&mut self, weight: f64) -> NodeId {
        let id = self.next_free_node_id();
        self.insert_node(id, weight)
    }

    fn next_free_node_id(&mut self) -> NodeId {
        NodeId(self.registry.generate(EntityKind::Node))
    }

    fn insert_node(&mut self, id: NodeId, weight: f64) -> NodeId {
        self.nodes.insert(id, Node::new(id, weight));
        debug!("Created node {}", id);
        id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes, owned or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All live nodes in creation order
    pub fn all_nodes(&self) -> Vec<&Node> {
        self.nodes.values().collect()
    }

    /// Give a node a new identifier, updating every reference to it
    pub fn rename_node(&mut self, old: NodeId, new: impl Into<NodeId>) -> GraphResult<()> {
        let new = new.into();
        let node = self.nodes.get(&old).ok_or(GraphError::NodeNotFound(old))?;
        let (owner, touching) = (node.graph, node.touching());
        self.registry.rename(EntityKind::Node, old.0, new.0)?;
        if old == new {
            return Ok(());
        }

        if let Some(graph) = owner.and_then(|graph_id| self.graphs.get_mut(&graph_id)) {
            rekey_set(&mut graph.nodes, &old, new);
        }
        for connection_id in touching {
            if let Some(connection) = self.connections.get_mut(&connection_id) {
                if connection.from == old {
                    connection.from = new;
                }
                if connection.to == old {
                    connection.to = new;
                }
            }
        }
        rekey_map(&mut self.nodes, &old, new);
        if let Some(node) = self.nodes.get_mut(&new) {
            node.id = new;
        }

        debug!("Renamed node {} to {}", old, new);
        Ok(())
    }

    /// Destroy a node: detach it from its graph (dropping every connection
    /// touching it) and release its identifier
    pub fn destroy_node(&mut self, id: NodeId) -> GraphResult<Node> {
        let owner = self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))?.graph;
        if let Some(graph_id) = owner {
            self.remove_node(graph_id, id)?;
        }

        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        self.registry.release(EntityKind::Node, id.0);
        debug!("Destroyed node {}", id);
        Ok(node)
    }

    // ============================================================
    // Graphs
    // ============================================================

    /// Create an empty graph with a generated id
    pub fn create_graph(&mut self, options: GraphOptions) -> GraphId {
        let id = GraphId(self.registry.generate(EntityKind::Graph));
        self.insert_graph(id, options)
    }

    /// Create an empty graph with a caller-chosen id
    pub fn create_graph_with_id(
        &mut self,
        id: impl Into<GraphId>,
        options: GraphOptions,
    ) -> GraphResult<GraphId> {
        let id = self.registry.allocate_graph(Some(id.into()))?;
        Ok(self.insert_graph(id, options))
    }

    fn insert_graph(&mut self, id: GraphId, options: GraphOptions) -> GraphId {
        self.graphs.insert(id, Graph::new(id, options));
        debug!(
            "Created graph {} (directional: {}, weighted: {})",
            id, options.directional, options.weighted
        );
        id
    }

    pub fn get_graph(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.get(&id)
    }

    pub fn get_graph_mut(&mut self, id: GraphId) -> Option<&mut Graph> {
        self.graphs.get_mut(&id)
    }

    pub fn has_graph(&self, id: GraphId) -> bool {
        self.graphs.contains_key(&id)
    }

    pub fn graph_count(&self) -> usize {
        self.graphs.len()
    }

    pub(crate) fn graph_or_err(&self, id: GraphId) -> GraphResult<&Graph> {
        self.graphs.get(&id).ok_or(GraphError::GraphNotFound(id))
    }

    /// Give a graph a new identifier, updating its nodes and connections
    pub fn rename_graph(&mut self, old: GraphId, new: impl Into<GraphId>) -> GraphResult<()> {
        let new = new.into();
        if !self.graphs.contains_key(&old) {
            return Err(GraphError::GraphNotFound(old));
        }
        self.registry.rename(EntityKind::Graph, old.0, new.0)?;
        if old == new {
            return Ok(());
        }

        rekey_map(&mut self.graphs, &old, new);
        if let Some(graph) = self.graphs.get_mut(&new) {
            graph.id = new;
            for node_id in graph.nodes.iter() {
                if let Some(node) = self.nodes.get_mut(node_id) {
                    node.graph = Some(new);
                }
            }
            for connection_id in graph.connections.iter() {
                if let Some(connection) = self.connections.get_mut(connection_id) {
                    connection.graph = new;
                }
            }
        }

        debug!("Renamed graph {} to {}", old, new);
        Ok(())
    }

    /// Destroy a graph and its connections. Member nodes survive, ownerless.
    pub fn destroy_graph(&mut self, id: GraphId) -> GraphResult<Graph> {
        let connection_ids: Vec<ConnectionId> = self.graph_or_err(id)?.connections().collect();
        for connection_id in connection_ids {
            self.detach_connection(connection_id);
        }

        let graph = self
            .graphs
            .shift_remove(&id)
            .ok_or(GraphError::GraphNotFound(id))?;
        for node_id in graph.nodes.iter() {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.graph = None;
            }
        }
        self.registry.release(EntityKind::Graph, id.0);
        debug!("Destroyed graph {} ({} nodes released)", id, graph.order());
        Ok(graph)
    }

    // ============================================================
    // Membership
    // ============================================================

    /// Add an ownerless node to a graph. Including a current member is a no-op.
    pub fn include_node(&mut self, graph_id: GraphId, node_id: NodeId) -> GraphResult<()> {
        self.graph_or_err(graph_id)?;
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;

        match node.graph {
            Some(owner) if owner != graph_id => {
                return Err(GraphError::NodeAlreadyInAGraph {
                    node: node_id,
                    graph: owner,
                });
            }
            Some(_) => return Ok(()),
            None => node.graph = Some(graph_id),
        }

        if let Some(graph) = self.graphs.get_mut(&graph_id) {
            graph.nodes.insert(node_id);
        }
        debug!("Included node {} in graph {}", node_id, graph_id);
        Ok(())
    }

    /// Take a node out of a graph along with every connection touching it
    pub fn remove_node(&mut self, graph_id: GraphId, node_id: NodeId) -> GraphResult<()> {
        if !self.graph_or_err(graph_id)?.contains_node(node_id) {
            return Err(GraphError::NodeNotInGraph {
                nodes: vec![node_id],
                graph: graph_id,
            });
        }

        let touching = self
            .nodes
            .get(&node_id)
            .map(|node| node.touching())
            .unwrap_or_default();
        let removed = touching.len();
        for connection_id in touching {
            self.detach_connection(connection_id);
        }

        if let Some(graph) = self.graphs.get_mut(&graph_id) {
            graph.nodes.shift_remove(&node_id);
        }
        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.graph = None;
        }

        debug!(
            "Removed node {} from graph {} ({} connections dropped)",
            node_id, graph_id, removed
        );
        Ok(())
    }

    // ============================================================
    // Connections
    // ============================================================

    /// Connect two members of a graph.
    ///
    /// `directional` defaults to the graph's own flag. An undirected addition
    /// stores the reverse connection as well. Returns the forward connection.
    pub fn add_connection(
        &mut self,
        graph_id: GraphId,
        from: NodeId,
        to: NodeId,
        weight: f64,
        directional: Option<bool>,
    ) -> GraphResult<ConnectionId> {
        let graph = self.graph_or_err(graph_id)?;
        let missing = graph.missing_nodes(&[from, to]);
        if !missing.is_empty() {
            return Err(GraphError::NodeNotInGraph {
                nodes: missing,
                graph: graph_id,
            });
        }
        let directional = directional.unwrap_or(graph.is_directional);

        let forward = self.insert_connection(graph_id, from, to, weight);
        if !directional {
            self.insert_connection(graph_id, to, from, weight);
        }
        Ok(forward)
    }

    /// Connect two members using the default weight and the graph's directionality
    pub fn connect(&mut self, graph_id: GraphId, from: NodeId, to: NodeId) -> GraphResult<ConnectionId> {
        let weight = self.config.default_connection_weight;
        self.add_connection(graph_id, from, to, weight, None)
    }

    fn insert_connection(
        &mut self,
        graph_id: GraphId,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> ConnectionId {
        let id = ConnectionId(self.registry.generate(EntityKind::Connection));
        self.connections
            .insert(id, Connection::new(id, from, to, weight, graph_id));
        if let Some(graph) = self.graphs.get_mut(&graph_id) {
            graph.connections.insert(id);
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.outgoing.insert(id);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            node.incoming.insert(id);
        }
        debug!("Created connection {} ({} -> {}) in graph {}", id, from, to, graph_id);
        id
    }

    pub fn get_connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn get_connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    pub fn has_connection(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Destroy a single connection, releasing its identifier
    pub fn remove_connection(&mut self, id: ConnectionId) -> GraphResult<Connection> {
        self.detach_connection(id)
            .ok_or(GraphError::ConnectionNotFound(id))
    }

    /// Give a connection a new identifier, updating its graph and endpoints
    pub fn rename_connection(
        &mut self,
        old: ConnectionId,
        new: impl Into<ConnectionId>,
    ) -> GraphResult<()> {
        let new = new.into();
        let connection = self
            .connections
            .get(&old)
            .ok_or(GraphError::ConnectionNotFound(old))?;
        let (from, to, graph_id) = (connection.from, connection.to, connection.graph);
        self.registry.rename(EntityKind::Connection, old.0, new.0)?;
        if old == new {
            return Ok(());
        }

        if let Some(graph) = self.graphs.get_mut(&graph_id) {
            rekey_set(&mut graph.connections, &old, new);
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            rekey_set(&mut node.outgoing, &old, new);
        }
        if let Some(node) = self.nodes.get_mut(&to) {
            rekey_set(&mut node.incoming, &old, new);
        }
        rekey_map(&mut self.connections, &old, new);
        if let Some(connection) = self.connections.get_mut(&new) {
            connection.id = new;
        }

        debug!("Renamed connection {} to {}", old, new);
        Ok(())
    }

    /// Unlink a connection from its graph and source node, then release its id
    fn detach_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let connection = self.connections.shift_remove(&id)?;
        if let Some(graph) = self.graphs.get_mut(&connection.graph) {
            graph.connections.shift_remove(&id);
        }
        if let Some(node) = self.nodes.get_mut(&connection.from) {
            node.outgoing.shift_remove(&id);
        }
        if let Some(node) = self.nodes.get_mut(&connection.to) {
            node.incoming.shift_remove(&id);
        }
        self.registry.release(EntityKind::Connection, id.0);
        debug!("Removed connection {}", id);
        Some(connection)
    }

    /// Connections leaving a node, in insertion order
    pub fn get_outgoing_connections(&self, node_id: NodeId) -> Vec<&Connection> {
        self.nodes
            .get(&node_id)
            .map(|node| {
                node.outgoing
                    .iter()
                    .filter_map(|id| self.connections.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Targets of a node's outgoing connections (duplicates kept)
    pub fn successors(&self, node_id: NodeId) -> Vec<NodeId> {
        self.get_outgoing_connections(node_id)
            .into_iter()
            .map(|connection| connection.to)
            .collect()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace `old` by `new` keeping its position
fn rekey_set<T: Hash + Eq>(set: &mut IndexSet<T>, old: &T, new: T) {
    if let Some(index) = set.get_index_of(old) {
        set.shift_remove_index(index);
        let (last, _) = set.insert_full(new);
        set.move_index(last, index);
    }
}

/// Replace the key `old` by `new` keeping the entry's position
fn rekey_map<K: Hash + Eq, V>(map: &mut IndexMap<K, V>, old: &K, new: K) {
    if let Some((index, _, value)) = map.shift_remove_full(old) {
        let (last, _) = map.insert_full(new, value);
        map.move_index(last, index);
    }
}
