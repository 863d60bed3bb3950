//! Watercluster (WCF) encoding and streaming decoding.
//!
//! The encoder writes every out-neighbour of every node, so a directed graph
//! survives a round trip unchanged. The decoder is a pull-based iterator over
//! a byte stream: clean end of input ends the iteration, end of input inside
//! a record is reported as [`FormatError::TruncatedStream`].

use std::io::{self, ErrorKind, Read, Write};

use tracing::debug;
use wcf_core::Graph;

use crate::error::{check_order, FormatError, Result};

/// How decoded neighbour bytes become arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// `current -> neighbour` only; one-way and mutual pairs stay distinct.
    #[default]
    Directed,
    /// Arcs in both directions for every neighbour byte.
    Symmetric,
}

/// Encode a single graph as one WCF record.
pub fn encode(graph: &Graph) -> Result<Vec<u8>> {
    let order = check_order(graph.order())?;
    let mut buf = Vec::with_capacity(1 + graph.order() + graph.arc_count());
    buf.push(order);
    for node in graph.nodes() {
        // neighbour < order <= 255, so neighbour + 1 fits in a byte
        buf.extend(node.out.iter().map(|&n| (n + 1) as u8));
        buf.push(0);
    }
    Ok(buf)
}

/// Encode a graph and write it to `writer`.
///
/// The record is assembled in memory first, so an oversized graph leaves the
/// writer untouched.
pub fn write_graph<W: Write>(graph: &Graph, writer: &mut W) -> Result<()> {
    let record = encode(graph)?;
    writer.write_all(&record)?;
    Ok(())
}

/// Encode a sequence of graphs as one concatenated stream.
pub fn encode_all<'a, I>(graphs: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut buf = Vec::new();
    for graph in graphs {
        buf.extend(encode(graph)?);
    }
    Ok(buf)
}

/// Decode every record in `bytes` with directed semantics.
pub fn decode(bytes: &[u8]) -> Result<Vec<Graph>> {
    WcfReader::new(bytes).collect()
}

/// Decode every record in `bytes`, symmetrizing each edge.
pub fn decode_symmetric(bytes: &[u8]) -> Result<Vec<Graph>> {
    WcfReader::symmetric(bytes).collect()
}

/// Lazy reader producing one graph per WCF record.
///
/// The reader consumes its input; once it has returned `None` or an error it
/// is exhausted.
#[derive(Debug)]
pub struct WcfReader<R> {
    reader: R,
    mode: DecodeMode,
    graphs_read: usize,
    finished: bool,
}

impl<R: Read> WcfReader<R> {
    /// Reader that keeps arc directions.
    pub fn new(reader: R) -> Self {
        Self::with_mode(reader, DecodeMode::Directed)
    }

    /// Reader that inserts every edge in both directions.
    pub fn symmetric(reader: R) -> Self {
        Self::with_mode(reader, DecodeMode::Symmetric)
    }

    pub fn with_mode(reader: R, mode: DecodeMode) -> Self {
        Self {
            reader,
            mode,
            graphs_read: 0,
            finished: false,
        }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Number of graphs successfully decoded so far.
    pub fn graphs_read(&self) -> usize {
        self.graphs_read
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_graph(&mut self) -> Result<Option<Graph>> {
        let Some(order) = self.next_byte()? else {
            return Ok(None);
        };
        let order = order as usize;
        let number = self.graphs_read + 1;
        let mut graph = Graph::with_order(order);

        let mut current = 0;
        while current < order {
            match self.next_byte()? {
                None => {
                    return Err(FormatError::TruncatedStream {
                        graph: number,
                        expected: order,
                        found: current,
                        unit: "node lists",
                    })
                }
                Some(0) => current += 1,
                Some(byte) => {
                    let neighbor = byte as usize - 1;
                    match self.mode {
                        DecodeMode::Directed => {
                            graph.add_arc(current, neighbor)?;
                        }
                        DecodeMode::Symmetric => graph.add_edge(current, neighbor)?,
                    }
                }
            }
        }

        self.graphs_read = number;
        debug!(graph = number, order, arcs = graph.arc_count(), "decoded watercluster record");
        Ok(Some(graph))
    }
}

impl<R: Read> Iterator for WcfReader<R> {
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

impl<R: Read> std::iter::FusedIterator for WcfReader<R> {}
