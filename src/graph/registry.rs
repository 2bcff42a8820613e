//! Identifier registry
//!
//! Keeps one namespace per entity kind. An identifier stays taken until it is
//! explicitly released; released identifiers may be requested again, while the
//! generator keeps counting forward so generated ids are never handed out twice
//! in a row. Only after `u64::MAX` does the generator wrap to 0.

use super::error::{GraphError, GraphResult};
use super::types::{ConnectionId, EntityKind, GraphId, NodeId};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone)]
struct Namespace {
    taken: FxHashSet<u64>,
    next_id: u64,
}

impl Namespace {
    fn new(first_id: u64) -> Self {
        Namespace {
            taken: FxHashSet::default(),
            next_id: first_id,
        }
    }

    /// Next free id at or after the counter. The counter wraps past
    /// `u64::MAX`; a free id always exists since live ids fit in memory.
    fn generate(&mut self) -> u64 {
        while self.taken.contains(&self.next_id) {
            self.next_id = self.next_id.wrapping_add(1);
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// Registry of live node, connection and graph identifiers
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    nodes: Namespace,
    connections: Namespace,
    graphs: Namespace,
}

impl IdentityRegistry {
    /// Create a registry whose generators start at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Create a registry whose generators start at `first_id`
    pub fn starting_at(first_id: u64) -> Self {
        IdentityRegistry {
            nodes: Namespace::new(first_id),
            connections: Namespace::new(first_id),
            graphs: Namespace::new(first_id),
        }
    }

    fn namespace(&self, kind: EntityKind) -> &Namespace {
        match kind {
            EntityKind::Node => &self.nodes,
            EntityKind::Connection => &self.connections,
            EntityKind::Graph => &self.graphs,
        }
    }

    fn namespace_mut(&mut self, kind: EntityKind) -> &mut Namespace {
        match kind {
            EntityKind::Node => &mut self.nodes,
            EntityKind::Connection => &mut self.connections,
            EntityKind::Graph => &mut self.graphs,
        }
    }

    /// Register `requested`, or a generated id when none is given
    pub fn allocate(&mut self, kind: EntityKind, requested: Option<u64>) -> GraphResult<u64> {
        let namespace = self.namespace_mut(kind);
        let id = match requested {
            Some(id) if namespace.taken.contains(&id) => {
                return Err(GraphError::already_exists(kind, id));
            }
            Some(id) => id,
            None => namespace.generate(),
        };
        namespace.taken.insert(id);
        Ok(id)
    }

    /// Register and return a fresh generated id
    pub fn generate(&mut self, kind: EntityKind) -> u64 {
        let namespace = self.namespace_mut(kind);
        let id = namespace.generate();
        namespace.taken.insert(id);
        id
    }

    /// Forget an identifier. Releasing an unknown id is a no-op.
    pub fn release(&mut self, kind: EntityKind, id: u64) {
        self.namespace_mut(kind).taken.remove(&id);
    }

    /// Swap `old` for `new` in one step, leaving the registry untouched on failure
    pub fn rename(&mut self, kind: EntityKind, old: u64, new: u64) -> GraphResult<()> {
        if old == new {
            return Ok(());
        }
        let namespace = self.namespace_mut(kind);
        if namespace.taken.contains(&new) {
            return Err(GraphError::already_exists(kind, new));
        }
        namespace.taken.insert(new);
        namespace.taken.remove(&old);
        Ok(())
    }

    pub fn contains(&self, kind: EntityKind, id: u64) -> bool {
        self.namespace(kind).taken.contains(&id)
    }

    /// Number of registered ids of one kind
    pub fn len(&self, kind: EntityKind) -> usize {
        self.namespace(kind).taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.taken.is_empty()
            && self.connections.taken.is_empty()
            && self.graphs.taken.is_empty()
    }

    pub fn allocate_node(&mut self, requested: Option<NodeId>) -> GraphResult<NodeId> {
        self.allocate(EntityKind::Node, requested.map(|id| id.0))
            .map(NodeId)
    }

    pub fn allocate_connection(
        &mut self,
        requested: Option<ConnectionId>,
    ) -> GraphResult<ConnectionId> {
        self.allocate(EntityKind::Connection, requested.map(|id| id.0))
            .map(ConnectionId)
    }

    pub fn allocate_graph(&mut self, requested: Option<GraphId>) -> GraphResult<GraphId> {
        self.allocate(EntityKind::Graph, requested.map(|id| id.0))
            .map(GraphId)
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_monotonic() {
        let mut registry = IdentityRegistry::new();
        let a = registry.allocate(EntityKind::Node, None).unwrap();
        let b = registry.allocate(EntityKind::Node, None).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn test_generator_skips_requested_ids() {
        let mut registry = IdentityRegistry::new();
        registry.allocate(EntityKind::Node, Some(1)).unwrap();
        registry.allocate(EntityKind::Node, Some(2)).unwrap();
        assert_eq!(registry.allocate(EntityKind::Node, None).unwrap(), 3);
    }

    #[test]
    fn test_duplicate_request_fails() {
        let mut registry = IdentityRegistry::new();
        registry.allocate_node(Some(NodeId(10))).unwrap();
        assert_eq!(
            registry.allocate_node(Some(NodeId(10))),
            Err(GraphError::NodeAlreadyExists(NodeId(10)))
        );
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut registry = IdentityRegistry::new();
        registry.allocate_node(Some(NodeId(5))).unwrap();
        assert!(registry.allocate_connection(Some(ConnectionId(5))).is_ok());
        assert!(registry.allocate_graph(Some(GraphId(5))).is_ok());
        assert_eq!(registry.len(EntityKind::Node), 1);
    }

    #[test]
    fn test_release_makes_id_available() {
        let mut registry = IdentityRegistry::new();
        registry.allocate(EntityKind::Graph, Some(3)).unwrap();
        registry.release(EntityKind::Graph, 3);
        registry.release(EntityKind::Graph, 3);
        assert!(!registry.contains(EntityKind::Graph, 3));
        assert_eq!(registry.allocate(EntityKind::Graph, Some(3)).unwrap(), 3);
    }

    #[test]
    fn test_rename() {
        let mut registry = IdentityRegistry::new();
        registry.allocate(EntityKind::Node, Some(1)).unwrap();
        registry.allocate(EntityKind::Node, Some(2)).unwrap();

        assert_eq!(
            registry.rename(EntityKind::Node, 1, 2),
            Err(GraphError::NodeAlreadyExists(NodeId(2)))
        );
        assert!(registry.contains(EntityKind::Node, 1));

        registry.rename(EntityKind::Node, 1, 7).unwrap();
        assert!(!registry.contains(EntityKind::Node, 1));
        assert!(registry.contains(EntityKind::Node, 7));

        registry.rename(EntityKind::Node, 7, 7).unwrap();
        assert!(registry.contains(EntityKind::Node, 7));
    }

    #[test]
    fn test_starting_at() {
        let mut registry = IdentityRegistry::starting_at(100);
        assert_eq!(registry.allocate_graph(None).unwrap(), GraphId(100));
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_generator_wraps_at_upper_bound() {
        let mut registry = IdentityRegistry::starting_at(u64::MAX);
        registry.allocate(EntityKind::Node, Some(0)).unwrap();

        assert_eq!(registry.generate(EntityKind::Node), u64::MAX);
        // 0 is taken, so the wrapped counter moves on to 1
        assert_eq!(registry.generate(EntityKind::Node), 1);
        assert_eq!(registry.len(EntityKind::Node), 3);
    }
}
