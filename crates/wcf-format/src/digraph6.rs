//! Reader for the digraph6 text format.
//!
//! One graph per line: `&`, the order, then the adjacency matrix row by row
//! (row = source, column = target), six bits per printable byte.

use std::io::{self, BufRead};

use tracing::debug;
use wcf_core::{Graph, MAX_ORDER};

use crate::error::{FormatError, Result};

/// Optional header some generators put in front of the first graph.
pub const HEADER: &str = ">>digraph6<<";

const BIAS: u8 = 63;
const LONG_ORDER: u8 = 126;

fn sextet(byte: u8, line: usize) -> Result<u32> {
    if !(BIAS..=LONG_ORDER).contains(&byte) {
        return Err(FormatError::MalformedLine {
            line,
            reason: format!("byte 0x{byte:02x} outside the digraph6 range"),
        });
    }
    Ok(u32::from(byte - BIAS))
}

/// Decode one digraph6 line.
///
/// `line` is the 1-based line number used in error reports, `graph` the
/// 1-based record number.
pub fn decode_line(text: &str, line: usize, graph: usize) -> Result<Graph> {
    let text = text.trim_end_matches(['\n', '\r']);
    let text = text.strip_prefix(HEADER).unwrap_or(text);
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'&') {
        return Err(FormatError::MalformedLine {
            line,
            reason: "not a digraph6 line (missing '&')".into(),
        });
    }

    let truncated = |expected: usize, found: usize| FormatError::TruncatedStream {
        graph,
        expected,
        found,
        unit: "bytes",
    };

    let (order, body) = match bytes.get(1) {
        None => return Err(truncated(2, bytes.len())),
        Some(&LONG_ORDER) => {
            if bytes.len() < 5 {
                return Err(truncated(5, bytes.len()));
            }
            if bytes[2] == LONG_ORDER {
                // 36-bit form, only used for orders far beyond the limit
                if bytes.len() < 9 {
                    return Err(truncated(9, bytes.len()));
                }
                let mut order = 0usize;
                for &b in &bytes[3..9] {
                    order = (order << 6) | sextet(b, line)? as usize;
                }
                return Err(FormatError::GraphTooLarge { order });
            }
            let n = (sextet(bytes[2], line)? << 12)
                | (sextet(bytes[3], line)? << 6)
                | sextet(bytes[4], line)?;
            (n as usize, &bytes[5..])
        }
        Some(&b) => (sextet(b, line)? as usize, &bytes[2..]),
    };
    if order > MAX_ORDER {
        return Err(FormatError::GraphTooLarge { order });
    }

    let bits = order * order;
    let needed = bits.div_ceil(6);
    if body.len() < needed {
        return Err(truncated(needed, body.len()));
    }

    let mut g = Graph::with_order(order);
    for k in 0..bits {
        let value = sextet(body[k / 6], line)?;
        if value & (1 << (5 - k % 6)) == 0 {
            continue;
        }
        let (from, to) = (k / order, k % order);
        g.add_arc(from, to)?;
    }
    Ok(g)
}

/// Lazy reader producing one graph per digraph6 line. Empty lines are skipped.
pub struct Digraph6Reader<R> {
    lines: io::Lines<R>,
    line_number: usize,
    graphs_read: usize,
    finished: bool,
}

impl<R: BufRead> Digraph6Reader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            graphs_read: 0,
            finished: false,
        }
    }

    pub fn graphs_read(&self) -> usize {
        self.graphs_read
    }

    fn read_graph(&mut self) -> Result<Option<Graph>> {
        loop {
            let Some(line) = self.lines.next() else {
                return Ok(None);
            };
            let line = line?;
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }
            let graph = decode_line(&line, self.line_number, self.graphs_read + 1)?;
            self.graphs_read += 1;
            debug!(graph = self.graphs_read, order = graph.order(), "decoded digraph6 line");
            return Ok(Some(graph));
        }
    }
}

impl<R: BufRead> Iterator for Digraph6Reader<R> {
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
