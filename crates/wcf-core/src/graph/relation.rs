//! Tagged view of the relationships between pairs of nodes.
//!
//! A pair of nodes is either joined by a single arc or by arcs in both
//! directions. Enumerating relations instead of raw arcs means a mutual pair
//! is reported once and a one-way arc never has to be looked up twice.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One relationship between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Relation {
    /// Only the arc `src -> dst` is present.
    Directed { src: usize, dst: usize },
    /// Both `a -> b` and `b -> a` are present. Always `a < b`.
    Mutual { a: usize, b: usize },
}

impl Relation {
    /// The two endpoints in the order the relation reports them.
    pub fn endpoints(&self) -> (usize, usize) {
        match *self {
            Relation::Directed { src, dst } => (src, dst),
            Relation::Mutual { a, b } => (a, b),
        }
    }

    /// The endpoints as an unordered pair, smaller index first.
    pub fn unordered(&self) -> (usize, usize) {
        let (x, y) = self.endpoints();
        (x.min(y), x.max(y))
    }

    pub fn is_mutual(&self) -> bool {
        matches!(self, Relation::Mutual { .. })
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Directed { src, dst } => write!(f, "{src} -> {dst}"),
            Relation::Mutual { a, b } => write!(f, "{a} <-> {b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unordered_sorts_directed_endpoints() {
        let r = Relation::Directed { src: 5, dst: 2 };
        assert_eq!(r.endpoints(), (5, 2));
        assert_eq!(r.unordered(), (2, 5));
        assert!(!r.is_mutual());
    }

    #[test]
    fn display() {
        assert_eq!(Relation::Directed { src: 0, dst: 1 }.to_string(), "0 -> 1");
        assert_eq!(Relation::Mutual { a: 0, b: 1 }.to_string(), "0 <-> 1");
    }
}
