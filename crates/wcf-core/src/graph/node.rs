//! The Node struct: outgoing and incoming adjacency of one vertex.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A vertex in a watercluster graph.
///
/// Both sets hold 0-based node indices. Sets keep iteration ascending and
/// collapse duplicate arcs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Directed successors (arcs leaving this node).
    pub out: BTreeSet<usize>,
    /// Directed predecessors (arcs entering this node).
    #[serde(rename = "in")]
    pub incoming: BTreeSet<usize>,
}

impl Node {
    /// Create a node without any arcs.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_degree(&self) -> usize {
        self.out.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    /// Successors and predecessors merged, ascending and without duplicates.
    pub fn neighbours(&self) -> BTreeSet<usize> {
        self.out.union(&self.incoming).copied().collect()
    }

    /// True if this node has an arc to `target`.
    pub fn has_arc_to(&self, target: usize) -> bool {
        self.out.contains(&target)
    }
}
