//! Degree invariants and the bookkeeping for filtering graphs by them.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::graph::Graph;

/// Errors from invariant selection and filter construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("unknown invariant: '{name}'. Available invariants: arcs, sink, source")]
    UnknownInvariant { name: String },

    #[error("this filter will not let any graph pass")]
    FilterPassesNothing,

    #[error("this filter will let any graph pass")]
    FilterPassesEverything,
}

/// An integer-valued property of a directed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Invariant {
    /// Number of arcs.
    Arcs,
    /// Number of nodes without outgoing arcs.
    Sink,
    /// Number of nodes without incoming arcs.
    Source,
}

impl Invariant {
    pub const ALL: [Invariant; 3] = [Invariant::Arcs, Invariant::Sink, Invariant::Source];

    pub fn parse(s: &str) -> Result<Self, InvariantError> {
        match s {
            "arcs" => Ok(Invariant::Arcs),
            "sink" | "sinks" => Ok(Invariant::Sink),
            "source" | "sources" => Ok(Invariant::Source),
            _ => Err(InvariantError::UnknownInvariant {
                name: s.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Invariant::Arcs => "arcs",
            Invariant::Sink => "sink",
            Invariant::Source => "source",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Invariant::Arcs => "the number of arcs in the graph",
            Invariant::Sink => "the number of sinks in the graph",
            Invariant::Source => "the number of sources in the graph",
        }
    }

    pub fn evaluate(&self, graph: &Graph) -> usize {
        match self {
            Invariant::Arcs => graph.arc_count(),
            Invariant::Sink => graph.nodes().filter(|n| n.out_degree() == 0).count(),
            Invariant::Source => graph.nodes().filter(|n| n.in_degree() == 0).count(),
        }
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts invariant values relative to a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFilter {
    pub value: usize,
    pub equal: bool,
    pub less: bool,
    pub greater: bool,
}

impl ValueFilter {
    /// Build a filter, rejecting combinations that pass nothing or everything.
    pub fn new(
        value: usize,
        equal: bool,
        less: bool,
        greater: bool,
    ) -> Result<Self, InvariantError> {
        if !(equal || less || greater) {
            return Err(InvariantError::FilterPassesNothing);
        }
        if equal && less && greater {
            return Err(InvariantError::FilterPassesEverything);
        }
        Ok(Self {
            value,
            equal,
            less,
            greater,
        })
    }

    pub fn accepts(&self, candidate: usize) -> bool {
        (self.equal && candidate == self.value)
            || (self.less && candidate < self.value)
            || (self.greater && candidate > self.value)
    }

    /// Phrase used in reports, e.g. " less than or equal to".
    pub fn description(&self) -> &'static str {
        match (self.equal, self.greater, self.less) {
            (true, false, false) => "",
            (false, true, false) => " greater than",
            (true, true, false) => " greater than or equal to",
            (false, false, true) => " less than",
            (true, false, true) => " less than or equal to",
            (false, true, true) => " different from",
            _ => " (any)",
        }
    }
}

/// Extremes of a value seen across a stream of graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extreme {
    pub value: usize,
    pub count: usize,
    /// 1-based number of the first graph with this value.
    pub first_graph: usize,
}

/// Running statistics over the invariant values of a graph stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub graphs: usize,
    pub min: Option<Extreme>,
    pub max: Option<Extreme>,
    /// Number of graphs per value, ascending by value.
    pub distribution: BTreeMap<usize, usize>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the value of the next graph in the stream.
    pub fn record(&mut self, value: usize) {
        self.graphs += 1;
        let graph = self.graphs;
        *self.distribution.entry(value).or_default() += 1;

        match &mut self.min {
            Some(min) if value > min.value => {}
            Some(min) if value == min.value => min.count += 1,
            slot => {
                *slot = Some(Extreme {
                    value,
                    count: 1,
                    first_graph: graph,
                })
            }
        }
        match &mut self.max {
            Some(max) if value < max.value => {}
            Some(max) if value == max.value => max.count += 1,
            slot => {
                *slot = Some(Extreme {
                    value,
                    count: 1,
                    first_graph: graph,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Graph {
        // 0 -> 1 -> 2, 3 isolated
        Graph::from_arcs(4, [(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn evaluate_invariants() {
        let g = path();
        assert_eq!(Invariant::Arcs.evaluate(&g), 2);
        assert_eq!(Invariant::Sink.evaluate(&g), 2);
        assert_eq!(Invariant::Source.evaluate(&g), 2);
        assert_eq!(Invariant::Sink.evaluate(&g.flipped()), 2);
    }

    #[test]
    fn parse_invariants() {
        assert_eq!(Invariant::parse("arcs").unwrap(), Invariant::Arcs);
        assert_eq!(Invariant::parse("sink").unwrap(), Invariant::Sink);
        assert_eq!(Invariant::parse("source").unwrap(), Invariant::Source);
        assert!(matches!(
            Invariant::parse("girth"),
            Err(InvariantError::UnknownInvariant { .. })
        ));
    }

    #[test]
    fn filter_rejects_degenerate_combinations() {
        assert_eq!(
            ValueFilter::new(3, false, false, false),
            Err(InvariantError::FilterPassesNothing)
        );
        assert_eq!(
            ValueFilter::new(3, true, true, true),
            Err(InvariantError::FilterPassesEverything)
        );
    }

    #[test]
    fn filter_accepts() {
        let not_equal = ValueFilter::new(3, false, true, true).unwrap();
        assert!(not_equal.accepts(2));
        assert!(!not_equal.accepts(3));
        assert!(not_equal.accepts(4));
        assert_eq!(not_equal.description(), " different from");

        let at_most = ValueFilter::new(3, true, true, false).unwrap();
        assert!(at_most.accepts(3));
        assert!(!at_most.accepts(4));
        assert_eq!(at_most.description(), " less than or equal to");
    }

    #[test]
    fn summary_tracks_extremes() {
        let mut s = Summary::new();
        for v in [4, 2, 7, 2, 7, 5] {
            s.record(v);
        }
        assert_eq!(s.graphs, 6);
        assert_eq!(
            s.min,
            Some(Extreme {
                value: 2,
                count: 2,
                first_graph: 2
            })
        );
        assert_eq!(
            s.max,
            Some(Extreme {
                value: 7,
                count: 2,
                first_graph: 3
            })
        );
        assert_eq!(s.distribution.get(&2), Some(&2));
        assert_eq!(s.distribution.len(), 4);
    }
}
