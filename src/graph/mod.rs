//! Graph model
//!
//! This module implements the entity model with:
//! - Nodes owned by at most one graph, carrying weight and a traversal marker
//! - Directed connections; undirected edges are stored as two connections
//! - Graphs owning their members and connections, with insertion-ordered sets
//! - A session-scoped identity registry instead of process-wide globals
//! - Adjacency-matrix import/export and structural copy/merge

pub mod connection;
pub mod error;
pub mod matrix;
pub mod membership;
pub mod merge;
pub mod node;
pub mod registry;
pub mod session;
pub mod types;

// Re-export main types
pub use connection::Connection;
pub use error::{GraphError, GraphResult};
pub use matrix::{AdjacencyMatrix, NodeOrdering};
pub use membership::{Graph, GraphOptions};
pub use node::Node;
pub use registry::IdentityRegistry;
pub use session::{Session, SessionConfig};
pub use types::{ConnectionId, EntityKind, GraphId, NodeId, NodeState};
