//! Degree statistics
//!
//! A node's degree is the number of its outgoing connections. In an undirected
//! graph every logical edge contributes one outgoing connection to each end,
//! so this is the usual undirected degree.

use crate::graph::{GraphId, GraphResult, NodeId, Session};
use rustc_hash::FxHashSet;

impl Session {
    fn degrees(&self, graph_id: GraphId) -> GraphResult<Vec<(NodeId, usize)>> {
        let graph = self.graph_or_err(graph_id)?;
        Ok(graph
            .nodes()
            .filter_map(|id| self.get_node(id))
            .map(|node| (node.id(), node.degree()))
            .collect())
    }

    /// Mean degree of the members; `None` for an empty graph
    pub fn average_degree(&self, graph_id: GraphId) -> GraphResult<Option<f64>> {
        let degrees = self.degrees(graph_id)?;
        if degrees.is_empty() {
            return Ok(None);
        }
        let total: usize = degrees.iter().map(|(_, degree)| degree).sum();
        Ok(Some(total as f64 / degrees.len() as f64))
    }

    /// `m / (n(n-1))` for directed graphs, `2m / (n(n-1))` otherwise.
    /// `None` below two members.
    ///
    /// For undirected graphs `m` counts distinct endpoint pairs, so the two
    /// stored directions of an edge count once.
    pub fn density(&self, graph_id: GraphId) -> GraphResult<Option<f64>> {
        let graph = self.graph_or_err(graph_id)?;
        let order = graph.order();
        if order < 2 {
            return Ok(None);
        }
        let possible = (order * (order - 1)) as f64;
        let density = if graph.is_directional() {
            graph.size() as f64 / possible
        } else {
            let edges: FxHashSet<(NodeId, NodeId)> = graph
                .connections()
                .filter_map(|id| self.get_connection(id))
                .map(|c| {
                    if c.from() <= c.to() {
                        (c.from(), c.to())
                    } else {
                        (c.to(), c.from())
                    }
                })
                .collect();
            2.0 * edges.len() as f64 / possible
        };
        Ok(Some(density))
    }

    /// Members with an odd degree, in member order
    pub fn odd_degree_nodes(&self, graph_id: GraphId) -> GraphResult<Vec<NodeId>> {
        Ok(self
            .degrees(graph_id)?
            .into_iter()
            .filter(|(_, degree)| degree % 2 == 1)
            .map(|(id, _)| id)
            .collect())
    }

    /// Members with an even degree, in member order
    pub fn even_degree_nodes(&self, graph_id: GraphId) -> GraphResult<Vec<NodeId>> {
        Ok(self
            .degrees(graph_id)?
            .into_iter()
            .filter(|(_, degree)| degree % 2 == 0)
            .map(|(id, _)| id)
            .collect())
    }

    /// Degree-parity test for an Euler walk: at most two odd-degree members.
    ///
    /// Connectivity is not checked, so a disconnected graph can pass.
    pub fn euler_walk(&self, graph_id: GraphId) -> GraphResult<bool> {
        Ok(self.odd_degree_nodes(graph_id)?.len() <= 2)
    }
}

#[cfg(test)]
mod tests {
    use crate::algo::test_support::build;
    use crate::graph::GraphOptions;

    #[test]
    fn test_average_degree() {
        // Star: centre has 3, leaves have 1
        let (session, graph, _) = build(GraphOptions::undirected(), 4, &[(0, 1), (0, 2), (0, 3)]);
        assert_eq!(session.average_degree(graph).unwrap(), Some(1.5));

        let (session, graph, _) = build(GraphOptions::undirected(), 0, &[]);
        assert_eq!(session.average_degree(graph).unwrap(), None);
    }

    #[test]
    fn test_density() {
        let (session, graph, _) = build(GraphOptions::directed(), 3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(session.density(graph).unwrap(), Some(0.5));

        let (session, graph, _) = build(GraphOptions::undirected(), 3, &[(0, 1)]);
        // Two stored connections, one edge
        assert_eq!(session.density(graph).unwrap(), Some(2.0 / 6.0));

        let (session, graph, _) = build(GraphOptions::undirected(), 3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(session.density(graph).unwrap(), Some(1.0));

        let (session, graph, _) = build(GraphOptions::undirected(), 1, &[]);
        assert_eq!(session.density(graph).unwrap(), None);
    }

    #[test]
    fn test_degree_parity_partition() {
        let (session, graph, n) = build(GraphOptions::undirected(), 4, &[(0, 1), (1, 2), (2, 3)]);

        assert_eq!(session.odd_degree_nodes(graph).unwrap(), vec![n[0], n[3]]);
        assert_eq!(session.even_degree_nodes(graph).unwrap(), vec![n[1], n[2]]);
        assert!(session.euler_walk(graph).unwrap());
    }

    #[test]
    fn test_euler_walk_fails_with_four_odd_nodes() {
        // Star with three leaves: centre degree 3, three leaves of degree 1
        let (session, graph, _) = build(GraphOptions::undirected(), 4, &[(0, 1), (0, 2), (0, 3)]);

        assert_eq!(session.odd_degree_nodes(graph).unwrap().len(), 4);
        assert!(!session.euler_walk(graph).unwrap());
    }

    #[test]
    fn test_euler_walk_ignores_connectivity() {
        // Two disjoint cycles: every degree is even, yet no single walk covers both
        let (session, graph, _) = build(
            GraphOptions::undirected(),
            6,
            &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)],
        );
        assert!(session.euler_walk(graph).unwrap());
    }
}
