//! Fixtures shared by the algorithm tests

use crate::graph::{GraphId, GraphOptions, NodeId, Session};

/// Graph with `count` fresh members connected along `edges` (indices into the members)
pub(crate) fn build(
    options: GraphOptions,
    count: usize,
    edges: &[(usize, usize)],
) -> (Session, GraphId, Vec<NodeId>) {
    let mut session = Session::new();
    let graph = session.create_graph(options);
    let nodes: Vec<NodeId> = (0..count).map(|_| session.create_node()).collect();
    for &node in &nodes {
        session.include_node(graph, node).unwrap();
    }
    for &(from, to) in edges {
        session.connect(graph, nodes[from], nodes[to]).unwrap();
    }
    (session, graph, nodes)
}
