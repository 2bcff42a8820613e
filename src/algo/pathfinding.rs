//! Breadth-first traversal and unweighted distances
//!
//! Traversals use each node's `state` as scratch space: members are painted
//! `White` before the search, discovered nodes turn `Gray`, expanded nodes turn
//! `Black`, and every member goes back to `Unset` afterwards. Edge weights are
//! ignored, even on weighted graphs.

use crate::graph::{GraphError, GraphId, GraphResult, NodeId, NodeState, Session};
use rustc_hash::FxHashMap;
use std::collections::VecDeque;
use tracing::trace;

/// Distance between an ordered pair of nodes; `None` when unreachable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairDistance {
    pub from: NodeId,
    pub to: NodeId,
    pub distance: Option<usize>,
}

impl Session {
    /// Paint every member of a graph with the same traversal state
    pub(crate) fn paint_nodes(&mut self, graph_id: GraphId, state: NodeState) {
        if let Some(graph) = self.graphs.get(&graph_id) {
            for id in graph.nodes.iter() {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.state = state;
                }
            }
        }
    }

    fn mark_node(&mut self, id: NodeId, state: NodeState) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.state = state;
        }
    }

    fn state_of(&self, id: NodeId) -> NodeState {
        self.nodes
            .get(&id)
            .map(|node| node.state)
            .unwrap_or_default()
    }

    /// Core BFS. Returns every discovered node with its distance, in discovery
    /// order, stopping early once `target` is discovered.
    fn traverse(
        &mut self,
        graph_id: GraphId,
        start: NodeId,
        target: Option<NodeId>,
    ) -> Vec<(NodeId, usize)> {
        self.paint_nodes(graph_id, NodeState::White);
        self.mark_node(start, NodeState::Gray);

        let mut discovered = vec![(start, 0)];
        let mut queue = VecDeque::new();
        if target != Some(start) {
            queue.push_back((start, 0));
        }

        'search: while let Some((current, distance)) = queue.pop_front() {
            let neighbours = self.successors(current);
            for next in neighbours {
                if self.state_of(next) != NodeState::White {
                    continue;
                }
                self.mark_node(next, NodeState::Gray);
                discovered.push((next, distance + 1));
                if target == Some(next) {
                    break 'search;
                }
                queue.push_back((next, distance + 1));
            }
            self.mark_node(current, NodeState::Black);
        }

        self.paint_nodes(graph_id, NodeState::Unset);
        trace!(
            "BFS from {} in graph {} discovered {} nodes",
            start,
            graph_id,
            discovered.len()
        );
        discovered
    }

    fn require_members(&self, graph_id: GraphId, nodes: &[NodeId]) -> GraphResult<()> {
        let missing = self.graph_or_err(graph_id)?.missing_nodes(nodes);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GraphError::NodeNotInGraph {
                nodes: missing,
                graph: graph_id,
            })
        }
    }

    /// Nodes reachable from `start` with their hop distance, in discovery order
    pub fn breadth_first_search(
        &mut self,
        graph_id: GraphId,
        start: NodeId,
    ) -> GraphResult<Vec<(NodeId, usize)>> {
        self.require_members(graph_id, &[start])?;
        Ok(self.traverse(graph_id, start, None))
    }

    /// Unweighted shortest-path distance from `from` to `to`
    pub fn distance_between(
        &mut self,
        graph_id: GraphId,
        from: NodeId,
        to: NodeId,
    ) -> GraphResult<Option<usize>> {
        self.require_members(graph_id, &[from, to])?;
        let discovered = self.traverse(graph_id, from, Some(to));
        Ok(discovered
            .into_iter()
            .find(|(node, _)| *node == to)
            .map(|(_, distance)| distance))
    }

    /// Distances for every ordered pair of members (self-pairs included), row-major
    /// in member order. Runs one full traversal per source node.
    pub fn pairwise_distances(&mut self, graph_id: GraphId) -> GraphResult<Vec<PairDistance>> {
        let members: Vec<NodeId> = self.graph_or_err(graph_id)?.nodes().collect();
        let mut pairs = Vec::with_capacity(members.len() * members.len());

        for &from in &members {
            let reached: FxHashMap<NodeId, usize> =
                self.traverse(graph_id, from, None).into_iter().collect();
            for &to in &members {
                pairs.push(PairDistance {
                    from,
                    to,
                    distance: reached.get(&to).copied(),
                });
            }
        }
        Ok(pairs)
    }

    /// Distances for every ordered pair of members, row-major in member order
    pub fn all_distances(&mut self, graph_id: GraphId) -> GraphResult<Vec<Option<usize>>> {
        Ok(self
            .pairwise_distances(graph_id)?
            .into_iter()
            .map(|pair| pair.distance)
            .collect())
    }

    /// Largest finite distance between any ordered pair; `None` for an empty graph
    pub fn diameter(&mut self, graph_id: GraphId) -> GraphResult<Option<usize>> {
        Ok(self
            .pairwise_distances(graph_id)?
            .into_iter()
            .filter_map(|pair| pair.distance)
            .max())
    }

    /// First ordered pair (in member order) whose distance equals the diameter
    pub fn extreme_nodes(&mut self, graph_id: GraphId) -> GraphResult<Option<(NodeId, NodeId)>> {
        let mut best: Option<(usize, NodeId, NodeId)> = None;
        for pair in self.pairwise_distances(graph_id)? {
            let Some(distance) = pair.distance else {
                continue;
            };
            match best {
                Some((longest, _, _)) if distance <= longest => {}
                _ => best = Some((distance, pair.from, pair.to)),
            }
        }
        Ok(best.map(|(_, from, to)| (from, to)))
    }

    /// Mean distance over unordered pairs of distinct members.
    ///
    /// Ordered-pair distances are summed and halved, then divided by
    /// `n(n-1)/2`. Unreachable pairs count as 0. `None` below two members.
    pub fn average_distance(&mut self, graph_id: GraphId) -> GraphResult<Option<f64>> {
        let order = self.graph_or_err(graph_id)?.order();
        if order < 2 {
            return Ok(None);
        }

        let total: usize = self
            .pairwise_distances(graph_id)?
            .into_iter()
            .filter_map(|pair| pair.distance)
            .sum();
        let unordered_pairs = (order * (order - 1)) as f64 / 2.0;
        Ok(Some(total as f64 / 2.0 / unordered_pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::test_support::build;
    use crate::graph::GraphOptions;

    #[test]
    fn test_distance_on_path() {
        let (mut session, graph, n) = build(GraphOptions::undirected(), 4, &[(0, 1), (1, 2), (2, 3)]);

        assert_eq!(session.distance_between(graph, n[0], n[3]).unwrap(), Some(3));
        assert_eq!(session.distance_between(graph, n[3], n[0]).unwrap(), Some(3));
        assert_eq!(session.distance_between(graph, n[1], n[1]).unwrap(), Some(0));
    }

    #[test]
    fn test_distance_respects_direction() {
        let (mut session, graph, n) = build(GraphOptions::directed(), 3, &[(0, 1), (1, 2)]);

        assert_eq!(session.distance_between(graph, n[0], n[2]).unwrap(), Some(2));
        assert_eq!(session.distance_between(graph, n[2], n[0]).unwrap(), None);
    }

    #[test]
    fn test_distance_ignores_weights() {
        let mut session = Session::new();
        let graph = session.create_graph(GraphOptions::directed().with_weights());
        let n: Vec<NodeId> = (0..3).map(|_| session.create_node()).collect();
        for &node in &n {
            session.include_node(graph, node).unwrap();
        }
        session.add_connection(graph, n[0], n[2], 100.0, None).unwrap();
        session.add_connection(graph, n[0], n[1], 1.0, None).unwrap();
        session.add_connection(graph, n[1], n[2], 1.0, None).unwrap();

        assert_eq!(session.distance_between(graph, n[0], n[2]).unwrap(), Some(1));
    }

    #[test]
    fn test_distance_requires_members() {
        let (mut session, graph, n) = build(GraphOptions::undirected(), 2, &[(0, 1)]);
        let outsider = session.create_node();

        assert_eq!(
            session.distance_between(graph, n[0], outsider),
            Err(GraphError::NodeNotInGraph {
                nodes: vec![outsider],
                graph,
            })
        );
    }

    #[test]
    fn test_states_reset_after_traversal() {
        let (mut session, graph, n) = build(GraphOptions::undirected(), 3, &[(0, 1), (1, 2)]);
        session.get_node_mut(n[2]).unwrap().set_state(NodeState::Black);

        session.distance_between(graph, n[0], n[2]).unwrap();
        for id in &n {
            assert_eq!(session.get_node(*id).unwrap().state(), NodeState::Unset);
        }
    }

    #[test]
    fn test_breadth_first_search_order() {
        let (mut session, graph, n) = build(GraphOptions::directed(), 4, &[(0, 1), (0, 2), (2, 3)]);

        let visited = session.breadth_first_search(graph, n[0]).unwrap();
        assert_eq!(visited, vec![(n[0], 0), (n[1], 1), (n[2], 1), (n[3], 2)]);
    }

    #[test]
    fn test_all_distances_includes_self_pairs() {
        let (mut session, graph, _) = build(GraphOptions::directed(), 2, &[(0, 1)]);

        let distances = session.all_distances(graph).unwrap();
        assert_eq!(distances, vec![Some(0), Some(1), None, Some(0)]);
    }

    #[test]
    fn test_diameter_and_extreme_nodes() {
        let (mut session, graph, n) = build(GraphOptions::undirected(), 4, &[(0, 1), (1, 2), (2, 3)]);

        assert_eq!(session.diameter(graph).unwrap(), Some(3));
        assert_eq!(session.extreme_nodes(graph).unwrap(), Some((n[0], n[3])));
    }

    #[test]
    fn test_diameter_of_empty_graph() {
        let (mut session, graph, _) = build(GraphOptions::undirected(), 0, &[]);

        assert_eq!(session.diameter(graph).unwrap(), None);
        assert_eq!(session.extreme_nodes(graph).unwrap(), None);
        assert_eq!(session.average_distance(graph).unwrap(), None);
    }

    #[test]
    fn test_single_node_extremes() {
        let (mut session, graph, n) = build(GraphOptions::undirected(), 1, &[]);

        assert_eq!(session.diameter(graph).unwrap(), Some(0));
        assert_eq!(session.extreme_nodes(graph).unwrap(), Some((n[0], n[0])));
    }

    #[test]
    fn test_average_distance() {
        // Path of three: pairs (0,1)=1, (1,2)=1, (0,2)=2
        let (mut session, graph, _) = build(GraphOptions::undirected(), 3, &[(0, 1), (1, 2)]);

        let average = session.average_distance(graph).unwrap().unwrap();
        assert!((average - 4.0 / 3.0).abs() < 1e-9);
    }
}
