//! Directed graph model shared by the watercluster tools.
//!
//! A watercluster graph is a small directed graph whose arcs are hydrogen
//! bonds. Nodes are addressed by their 0-based position; every node keeps both
//! its successors and its predecessors so that one-way and mutual
//! relationships can be told apart without a second lookup.

pub mod graph;
pub mod invariant;

pub use graph::node::Node;
pub use graph::relation::Relation;
pub use graph::{Graph, GraphError, MAX_ORDER};
pub use invariant::{Extreme, Invariant, InvariantError, Summary, ValueFilter};
