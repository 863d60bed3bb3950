//! The graph container: an ordered list of nodes with arc bookkeeping.
//!
//! Nodes are identified by position (0..order). Adding an arc updates the
//! source's out-set and the target's in-set together, so the two views never
//! disagree.

pub mod node;
pub mod relation;

use serde::Serialize;
use thiserror::Error;

use self::node::Node;
use self::relation::Relation;

/// Largest order a graph can have and still be written in watercluster or
/// multi_code form (the order is stored in a single byte).
pub const MAX_ORDER: usize = 255;

/// Errors that can occur while building a graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The arc points outside the graph or back at its own source.
    #[error("invalid neighbour index {neighbor} for node {node} in a graph of order {order}")]
    InvalidNeighborIndex {
        node: usize,
        neighbor: usize,
        order: usize,
    },
}

/// A directed watercluster graph.
///
/// Only serialized, never deserialized: every graph is built through
/// [`Graph::add_arc`] so the out- and in-sets stay consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Create a graph with `order` isolated nodes.
    pub fn with_order(order: usize) -> Self {
        Self {
            nodes: vec![Node::new(); order],
        }
    }

    /// Build a graph from a list of arcs.
    pub fn from_arcs<I>(order: usize, arcs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::with_order(order);
        for (from, to) in arcs {
            graph.add_arc(from, to)?;
        }
        Ok(graph)
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by index.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// All nodes in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Insert the arc `from -> to`.
    ///
    /// Returns `false` if the arc was already present. Self-loops and indices
    /// outside the graph are rejected.
    pub fn add_arc(&mut self, from: usize, to: usize) -> Result<bool, GraphError> {
        let order = self.order();
        if from >= order || to >= order || to == from {
            return Err(GraphError::InvalidNeighborIndex {
                node: from,
                neighbor: to,
                order,
            });
        }
        let inserted = self.nodes[from].out.insert(to);
        self.nodes[to].incoming.insert(from);
        Ok(inserted)
    }

    /// Insert arcs in both directions between `a` and `b`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), GraphError> {
        self.add_arc(a, b)?;
        self.add_arc(b, a)?;
        Ok(())
    }

    pub fn has_arc(&self, from: usize, to: usize) -> bool {
        self.nodes.get(from).is_some_and(|n| n.has_arc_to(to))
    }

    /// Total number of arcs.
    pub fn arc_count(&self) -> usize {
        self.nodes.iter().map(Node::out_degree).sum()
    }

    /// All arcs, node-major and target-ascending.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(from, node)| node.out.iter().map(move |&to| (from, to)))
    }

    /// Every relationship exactly once, ordered like [`Graph::arcs`].
    ///
    /// A mutual pair is reported when its smaller endpoint is visited.
    pub fn relations(&self) -> Vec<Relation> {
        self.arcs()
            .filter_map(|(from, to)| {
                if !self.has_arc(to, from) {
                    Some(Relation::Directed { src: from, dst: to })
                } else if from < to {
                    Some(Relation::Mutual { a: from, b: to })
                } else {
                    None
                }
            })
            .collect()
    }

    /// True if every arc has its reverse.
    pub fn is_symmetric(&self) -> bool {
        self.arcs().all(|(from, to)| self.has_arc(to, from))
    }

    /// A copy in which every arc also appears reversed.
    pub fn symmetrized(&self) -> Self {
        let mut nodes = self.nodes.clone();
        for node in &mut nodes {
            let all = node.neighbours();
            node.out = all.clone();
            node.incoming = all;
        }
        Self { nodes }
    }

    /// A copy with the direction of every arc reversed.
    pub fn flipped(&self) -> Self {
        let nodes = self
            .nodes
            .iter()
            .map(|n| Node {
                out: n.incoming.clone(),
                incoming: n.out.clone(),
            })
            .collect();
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with_tail() -> Graph {
        // 0 <-> 1, 1 -> 2, 2 -> 0
        Graph::from_arcs(3, [(0, 1), (1, 0), (1, 2), (2, 0)]).unwrap()
    }

    #[test]
    fn add_arc_updates_both_sides() {
        let mut g = Graph::with_order(2);
        assert!(g.add_arc(0, 1).unwrap());
        assert!(!g.add_arc(0, 1).unwrap());
        assert!(g.node(0).unwrap().out.contains(&1));
        assert!(g.node(1).unwrap().incoming.contains(&0));
        assert_eq!(g.arc_count(), 1);
    }

    #[test]
    fn rejects_out_of_range_and_self_loops() {
        let mut g = Graph::with_order(3);
        assert_eq!(
            g.add_arc(0, 3),
            Err(GraphError::InvalidNeighborIndex {
                node: 0,
                neighbor: 3,
                order: 3
            })
        );
        assert!(g.add_arc(4, 0).is_err());
        assert_eq!(
            g.add_arc(2, 2),
            Err(GraphError::InvalidNeighborIndex {
                node: 2,
                neighbor: 2,
                order: 3
            })
        );
        assert_eq!(g.arc_count(), 0);
    }

    #[test]
    fn relations_report_mutual_pairs_once() {
        let g = triangle_with_tail();
        assert_eq!(
            g.relations(),
            vec![
                Relation::Mutual { a: 0, b: 1 },
                Relation::Directed { src: 1, dst: 2 },
                Relation::Directed { src: 2, dst: 0 },
            ]
        );
    }

    #[test]
    fn symmetrized_adds_reverse_arcs() {
        let g = triangle_with_tail().symmetrized();
        assert!(g.is_symmetric());
        assert_eq!(g.arc_count(), 6);
        assert!(g.relations().iter().all(Relation::is_mutual));
    }

    #[test]
    fn flipped_reverses_every_arc() {
        let g = triangle_with_tail();
        let f = g.flipped();
        assert_eq!(f.arc_count(), g.arc_count());
        for (from, to) in g.arcs() {
            assert!(f.has_arc(to, from));
        }
        assert_eq!(f.flipped(), g);
    }

    #[test]
    fn serializes_as_node_list() {
        let g = Graph::from_arcs(2, [(0, 1)]).unwrap();
        assert_eq!(
            serde_json::to_value(&g).unwrap(),
            serde_json::json!({
                "nodes": [
                    { "out": [1], "in": [] },
                    { "out": [], "in": [0] },
                ]
            })
        );
    }

    #[test]
    fn empty_graph() {
        let g = Graph::with_order(0);
        assert!(g.is_empty());
        assert!(g.relations().is_empty());
        assert!(g.is_symmetric());
    }
}
