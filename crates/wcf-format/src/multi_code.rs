//! Undirected multi_code projection of watercluster graphs.
//!
//! Each node lists the neighbours (in either direction) with a larger index,
//! so every undirected pair is written exactly once and arc directions are
//! dropped. The last node never has such neighbours and its list is omitted.
//! This is a different framing from [`crate::wcf::encode`] even though the
//! bytes look alike; the two must not be mixed.

use std::io::Write;

use tracing::debug;
use wcf_core::Graph;

use crate::error::{check_order, Result};

/// Header that opens every multi_code stream.
pub const MAGIC: &[u8; 14] = b">>multi_code<<";

/// Undirected pairs `(i, j)` with `i < j`, ascending.
pub fn project(graph: &Graph) -> Vec<(usize, usize)> {
    graph
        .nodes()
        .enumerate()
        .flat_map(|(i, node)| {
            node.neighbours()
                .into_iter()
                .filter(move |&j| j > i)
                .map(move |j| (i, j))
        })
        .collect()
}

/// The projection as a symmetric graph of the same order.
pub fn project_graph(graph: &Graph) -> Result<Graph> {
    let arcs = project(graph).into_iter().flat_map(|(i, j)| [(i, j), (j, i)]);
    Ok(Graph::from_arcs(graph.order(), arcs)?)
}

/// Encode one graph as a multi_code record (without the stream header).
pub fn encode_record(graph: &Graph) -> Result<Vec<u8>> {
    let order = check_order(graph.order())?;
    let mut buf = vec![order];
    for (i, node) in graph.nodes().enumerate().take(graph.order().saturating_sub(1)) {
        buf.extend(
            node.neighbours()
                .into_iter()
                .filter(|&j| j > i)
                .map(|j| (j + 1) as u8),
        );
        buf.push(0);
    }
    Ok(buf)
}

/// Encode a complete stream: header followed by one record per graph.
pub fn encode<'a, I>(graphs: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Graph>,
{
    let mut writer = MultiCodeWriter::new(Vec::new());
    for graph in graphs {
        writer.write_graph(graph)?;
    }
    writer.finish()
}

/// Streaming multi_code writer.
///
/// The header is emitted once, in front of the first record, or by
/// [`MultiCodeWriter::finish`] if no record was written.
#[derive(Debug)]
pub struct MultiCodeWriter<W: Write> {
    writer: W,
    header_written: bool,
    records: usize,
}

impl<W: Write> MultiCodeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            records: 0,
        }
    }

    /// Number of records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    fn write_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.writer.write_all(MAGIC)?;
            self.header_written = true;
        }
        Ok(())
    }

    /// Append one graph. Nothing is written if the graph is too large.
    pub fn write_graph(&mut self, graph: &Graph) -> Result<()> {
        let record = encode_record(graph)?;
        self.write_header()?;
        self.writer.write_all(&record)?;
        self.records += 1;
        debug!(record = self.records, order = graph.order(), "wrote multi_code record");
        Ok(())
    }

    /// Make sure the header is present, flush and return the inner writer.
    pub fn finish(mut self) -> Result<W> {
        self.write_header()?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    fn mutual_triangle() -> Graph {
        let mut g = Graph::with_order(3);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 2).unwrap();
        g
    }

    #[test]
    fn magic_is_fourteen_bytes() {
        assert_eq!(MAGIC.len(), 14);
    }

    #[test]
    fn triangle_record() {
        assert_eq!(
            encode_record(&mutual_triangle()).unwrap(),
            vec![3, 2, 3, 0, 3, 0]
        );
    }

    #[test]
    fn stream_has_single_header() {
        let g = mutual_triangle();
        let bytes = encode([&g, &g]).unwrap();
        let mut expected = MAGIC.to_vec();
        expected.extend([3, 2, 3, 0, 3, 0]);
        expected.extend([3, 2, 3, 0, 3, 0]);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn empty_stream_still_has_header() {
        let bytes = encode(std::iter::empty::<&Graph>()).unwrap();
        assert_eq!(bytes, MAGIC.to_vec());
    }

    #[test]
    fn directions_are_folded() {
        // 2 -> 0 and 0 -> 1 one-way, 1 <-> 2 mutual
        let g = Graph::from_arcs(3, [(2, 0), (0, 1), (1, 2), (2, 1)]).unwrap();
        assert_eq!(project(&g), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(encode_record(&g).unwrap(), vec![3, 2, 3, 0, 3, 0]);
    }

    #[test]
    fn small_orders() {
        assert_eq!(encode_record(&Graph::with_order(0)).unwrap(), vec![0]);
        assert_eq!(encode_record(&Graph::with_order(1)).unwrap(), vec![1]);
        let pair = Graph::from_arcs(2, [(1, 0)]).unwrap();
        assert_eq!(encode_record(&pair).unwrap(), vec![2, 2, 0]);
    }

    #[test]
    fn projection_is_idempotent() {
        let g = Graph::from_arcs(4, [(0, 3), (3, 1), (1, 3), (2, 0)]).unwrap();
        let once = project_graph(&g).unwrap();
        let twice = project_graph(&once).unwrap();
        assert_eq!(once, twice);
        assert_eq!(project(&once), project(&g));
        assert!(once.is_symmetric());
    }

    #[test]
    fn one_way_arc_projects_to_an_edge() {
        let g = Graph::from_arcs(3, [(2, 0)]).unwrap();
        let undirected = project_graph(&g).unwrap();
        assert_eq!(undirected.order(), 3);
        assert_eq!(undirected.arc_count(), 2);
        assert_eq!(project(&undirected), vec![(0, 2)]);
        assert_eq!(project_graph(&Graph::with_order(0)).unwrap(), Graph::with_order(0));
    }

    #[test]
    fn oversized_graph_is_rejected_without_output() {
        let mut writer = MultiCodeWriter::new(Vec::new());
        let result = writer.write_graph(&Graph::with_order(256));
        assert!(matches!(result, Err(FormatError::GraphTooLarge { order: 256 })));
        assert_eq!(writer.records(), 0);
        assert_eq!(writer.finish().unwrap(), MAGIC.to_vec());
    }
}
