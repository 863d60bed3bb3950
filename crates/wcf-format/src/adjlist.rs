//! Adjacency-list text: parsing into graphs and printing graphs back.
//!
//! Input is line oriented. Every node line looks like `label:3,5,7`; the label
//! only marks the line, the node index is the line's position in its batch.
//! Lines starting with `#` are comments. A blank line closes the current
//! batch, which becomes one graph whose order is the number of node lines.

use std::io::{self, BufRead, Write};

use tracing::debug;
use wcf_core::Graph;

use crate::error::{FormatError, Result};
use crate::wcf;

/// How neighbour indices in the text are numbered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdjacencyOptions {
    /// Indices start at 0 and are incremented before encoding. When false,
    /// indices start at 1 and are written unchanged.
    pub zero_based: bool,
}

impl AdjacencyOptions {
    pub fn zero_based() -> Self {
        Self { zero_based: true }
    }

    /// Map an index as written to a 0-based node index. `None` if the
    /// shift overflows.
    fn resolve(&self, written: i64) -> Option<i64> {
        if self.zero_based {
            Some(written)
        } else {
            written.checked_sub(1)
        }
    }
}

/// A node line together with its 1-based position in the input.
#[derive(Debug, Clone)]
struct NodeLine {
    number: usize,
    text: String,
}

/// Build one graph from a batch of node lines.
fn parse_batch(lines: &[NodeLine], options: AdjacencyOptions) -> Result<Graph> {
    let order = lines.len();
    let mut graph = Graph::with_order(order);
    for (node, line) in lines.iter().enumerate() {
        let Some((_label, list)) = line.text.split_once(':') else {
            return Err(FormatError::MalformedLine {
                line: line.number,
                reason: "expected 'label:neighbours'".into(),
            });
        };
        let list = list.trim();
        if list.is_empty() {
            continue;
        }
        for token in list.split(',') {
            let token = token.trim();
            let written: i64 = token.parse().map_err(|_| FormatError::MalformedLine {
                line: line.number,
                reason: format!("'{token}' is not a node index"),
            })?;
            let resolved = options.resolve(written);
            let Some(neighbor) = resolved
                .and_then(|n| usize::try_from(n).ok())
                .filter(|&n| n < order && n != node)
            else {
                return Err(FormatError::InvalidNeighborIndex {
                    node,
                    neighbor: resolved.unwrap_or(written),
                    order,
                });
            };
            graph.add_arc(node, neighbor)?;
        }
    }
    Ok(graph)
}

/// Parse all graphs in `text`.
pub fn parse_str(text: &str, options: AdjacencyOptions) -> Result<Vec<Graph>> {
    AdjacencyReader::new(text.as_bytes(), options).collect()
}

/// Convert adjacency text into a WCF stream. Returns the number of graphs.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    options: AdjacencyOptions,
) -> Result<usize> {
    let mut count = 0;
    for graph in AdjacencyReader::new(reader, options) {
        wcf::write_graph(&graph?, writer)?;
        count += 1;
    }
    Ok(count)
}

/// Lazy reader yielding one graph per blank-line-separated batch.
pub struct AdjacencyReader<R> {
    lines: io::Lines<R>,
    options: AdjacencyOptions,
    line_number: usize,
    graphs_read: usize,
    finished: bool,
}

impl<R: BufRead> AdjacencyReader<R> {
    pub fn new(reader: R, options: AdjacencyOptions) -> Self {
        Self {
            lines: reader.lines(),
            options,
            line_number: 0,
            graphs_read: 0,
            finished: false,
        }
    }

    pub fn graphs_read(&self) -> usize {
        self.graphs_read
    }

    fn read_graph(&mut self) -> Result<Option<Graph>> {
        let mut batch = Vec::new();
        loop {
            let Some(line) = self.lines.next() else {
                if batch.is_empty() {
                    return Ok(None);
                }
                break;
            };
            let line = line?;
            self.line_number += 1;
            let text = line.trim();
            if text.starts_with('#') {
                continue;
            }
            if text.is_empty() {
                // a blank line always closes a record, even an empty one
                break;
            }
            batch.push(NodeLine {
                number: self.line_number,
                text: text.to_string(),
            });
        }

        let graph = parse_batch(&batch, self.options)?;
        self.graphs_read += 1;
        debug!(graph = self.graphs_read, order = graph.order(), "parsed adjacency batch");
        Ok(Some(graph))
    }
}

impl<R: BufRead> Iterator for AdjacencyReader<R> {
    type Item = Result<Graph>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_graph() {
            Ok(Some(graph)) => Some(Ok(graph)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Print a graph as a numbered adjacency listing with 1-based indices.
///
/// ```text
/// Graph 1:
/// 1: 2, 3
/// 2:
/// 3: 1
/// ```
pub fn write_listing<W: Write>(writer: &mut W, number: usize, graph: &Graph) -> io::Result<()> {
    writeln!(writer, "Graph {number}:")?;
    for (v, node) in graph.nodes().enumerate() {
        let targets: Vec<String> = node.out.iter().map(|t| (t + 1).to_string()).collect();
        writeln!(writer, "{}: {}", v + 1, targets.join(", "))?;
    }
    writeln!(writer)
}
