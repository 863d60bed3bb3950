//! `wcf wcf2multi`: WCF stream to multi_code.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use wcf_format::{MultiCodeWriter, WcfReader};

/// Project every graph on `input` to its undirected multi_code record.
pub fn run<R: Read, W: Write>(input: R, output: W) -> Result<usize> {
    let mut writer = MultiCodeWriter::new(output);
    for (i, graph) in WcfReader::symmetric(input).enumerate() {
        let number = i + 1;
        let graph = graph.with_context(|| format!("decoding graph {number}"))?;
        writer
            .write_graph(&graph)
            .with_context(|| format!("writing graph {number}"))?;
    }
    let records = writer.records();
    writer.finish().context("finishing multi_code stream")?;
    Ok(records)
}
