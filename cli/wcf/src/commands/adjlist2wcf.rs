//! `wcf adjlist2wcf`: adjacency text to a WCF stream.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;
use wcf_format::{wcf, AdjacencyOptions, AdjacencyReader};

/// Convert every batch on `input`. Returns the number of graphs written.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    options: AdjacencyOptions,
) -> Result<usize> {
    let mut count = 0;
    for graph in AdjacencyReader::new(input, options) {
        let number = count + 1;
        let graph = graph.with_context(|| format!("parsing graph {number}"))?;
        wcf::write_graph(&graph, output).with_context(|| format!("writing graph {number}"))?;
        count = number;
    }
    output.flush()?;
    debug!(graphs = count, zero_based = options.zero_based, "adjacency lists converted");
    Ok(count)
}
