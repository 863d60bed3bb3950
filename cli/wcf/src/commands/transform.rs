//! `wcf transform`: structural transformations of directed graphs.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use wcf_core::Graph;
use wcf_format::wcf;

use super::directed_graphs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transformation {
    /// Reverse the direction of every arc
    Flip,
    /// Add the reverse of every arc
    Symmetrize,
}

impl Transformation {
    pub fn apply(&self, graph: &Graph) -> Graph {
        match self {
            Transformation::Flip => graph.flipped(),
            Transformation::Symmetrize => graph.symmetrized(),
        }
    }
}

/// Transform every graph on `input` and write the results as WCF.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    transformation: Transformation,
    digraph6: bool,
) -> Result<usize> {
    let mut count = 0;
    for graph in directed_graphs(input, digraph6) {
        let number = count + 1;
        let graph = graph.with_context(|| format!("reading graph {number}"))?;
        wcf::write_graph(&transformation.apply(&graph), output)
            .with_context(|| format!("writing graph {number}"))?;
        count = number;
    }
    output.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::wcf_stream;

    #[test]
    fn flip_reverses_arcs() {
        let g = Graph::from_arcs(3, [(0, 1), (1, 2), (2, 1)]).unwrap();
        let mut out = Vec::new();
        run(&wcf_stream(&[g])[..], &mut out, Transformation::Flip, false).unwrap();
        // 1 -> 0, 2 -> 1, 1 -> 2
        assert_eq!(out, vec![3, 0, 1, 3, 0, 2, 0]);
    }

    #[test]
    fn flipping_twice_is_identity() {
        let g = Graph::from_arcs(4, [(0, 3), (3, 1), (1, 2), (2, 1)]).unwrap();
        let mut once = Vec::new();
        run(&wcf_stream(&[g.clone()])[..], &mut once, Transformation::Flip, false).unwrap();
        let mut twice = Vec::new();
        run(&once[..], &mut twice, Transformation::Flip, false).unwrap();
        assert_eq!(wcf::decode(&twice).unwrap(), vec![g]);
    }

    #[test]
    fn symmetrize_adds_reverse_arcs() {
        let g = Graph::from_arcs(3, [(0, 2), (1, 2), (2, 1)]).unwrap();
        let mut out = Vec::new();
        run(&wcf_stream(&[g])[..], &mut out, Transformation::Symmetrize, false).unwrap();
        let result = wcf::decode(&out).unwrap();
        assert!(result[0].is_symmetric());
        assert_eq!(result[0].arc_count(), 4);
    }

    #[test]
    fn digraph6_input_gives_wcf_output() {
        let mut out = Vec::new();
        let count = run("&AO\n&AO\n".as_bytes(), &mut out, Transformation::Flip, true).unwrap();
        assert_eq!(count, 2);
        assert_eq!(out, vec![2, 0, 1, 0, 2, 0, 1, 0]);
    }
}
