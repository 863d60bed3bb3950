//! `wcf show`: print the adjacency lists of directed graphs.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use wcf_core::{Graph, Relation};
use wcf_format::adjlist;

use super::{directed_graphs, plural, OutputFormat};

/// One graph in `--format json` output.
#[derive(Debug, Serialize)]
struct GraphView<'a> {
    number: usize,
    order: usize,
    arcs: usize,
    relations: Vec<Relation>,
    graph: &'a Graph,
}

fn write_json<W: Write>(output: &mut W, number: usize, graph: &Graph) -> Result<()> {
    let view = GraphView {
        number,
        order: graph.order(),
        arcs: graph.arc_count(),
        relations: graph.relations(),
        graph,
    };
    serde_json::to_writer(&mut *output, &view)?;
    writeln!(output)?;
    Ok(())
}

/// List every graph on `input`, then report the count on `report`.
pub fn run<R, W, E>(
    input: R,
    output: &mut W,
    report: &mut E,
    digraph6: bool,
    format: OutputFormat,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut count = 0;
    for graph in directed_graphs(input, digraph6) {
        let number = count + 1;
        let graph = graph.with_context(|| format!("reading graph {number}"))?;
        match format {
            OutputFormat::Text => adjlist::write_listing(output, number, &graph)?,
            OutputFormat::Json => write_json(output, number, &graph)?,
        }
        count = number;
    }
    output.flush()?;
    writeln!(report, "Read {count} graph{}.", plural(count))?;
    Ok(count)
}
