//! Graph Topology
//!
//! An in-memory graph model with topology analytics: breadth-first distances,
//! diameter, degree statistics, density, Euler-walk parity and clustering.
//!
//! # Architecture
//!
//! - A [`Session`] owns every node, connection and graph, plus the identity
//!   registry that keeps ids unique per entity kind
//! - Entities are addressed by typed handles ([`NodeId`], [`ConnectionId`],
//!   [`GraphId`]); a node belongs to at most one graph
//! - Undirected edges are stored as two directed connections
//! - Analysis methods are grouped under [`algo`]
//!
//! ## Example Usage
//!
//! ```rust
//! use graph_topology::{GraphOptions, Session};
//!
//! let mut session = Session::new();
//! let graph = session.create_graph(GraphOptions::undirected());
//!
//! let a = session.create_node();
//! let b = session.create_node();
//! let c = session.create_node();
//! for node in [a, b, c] {
//!     session.include_node(graph, node).unwrap();
//! }
//! session.connect(graph, a, b).unwrap();
//! session.connect(graph, b, c).unwrap();
//!
//! assert_eq!(session.distance_between(graph, a, c).unwrap(), Some(2));
//! assert_eq!(session.diameter(graph).unwrap(), Some(2));
//! assert!(session.euler_walk(graph).unwrap());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;

// Re-export main types for convenience
pub use graph::{
    AdjacencyMatrix, Connection, ConnectionId, EntityKind, Graph, GraphError, GraphId,
    GraphOptions, GraphResult, IdentityRegistry, Node, NodeId, NodeOrdering, NodeState,
    Session, SessionConfig,
};

pub use algo::{GraphStatistics, PairDistance};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
