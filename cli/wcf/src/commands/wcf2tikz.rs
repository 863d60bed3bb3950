//! `wcf wcf2tikz`: WCF stream to TikZ pictures.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use wcf_format::WcfReader;
use wcf_tikz::planar::DEFAULT_PIPELINE;
use wcf_tikz::{graph_to_tikz, EmbedError, ExternalEmbedder, Layout};

use crate::config::WcfConfig;

pub const MISSING_TOOLS_WARNING: &str =
    "Missing the tools to handle planar embeddings. The -p option is not available.";

#[derive(Debug, Clone, Default)]
pub struct Wcf2TikzArgs {
    pub planar: bool,
    pub polar: bool,
    pub scale: Option<f64>,
    pub toolchain: Option<PathBuf>,
}

/// The planar embedder for `dir`. Only the default pipeline is checked for
/// its binaries; a custom command is trusted as configured.
fn planar_embedder(dir: &Path, command: &str) -> Result<ExternalEmbedder, EmbedError> {
    if command == DEFAULT_PIPELINE {
        ExternalEmbedder::locate(dir)
    } else {
        Ok(ExternalEmbedder::new(dir, command))
    }
}

/// Draw every graph on `input`. Returns the number of pictures written.
pub fn run<R: Read, W: Write>(
    input: R,
    output: &mut W,
    config: &WcfConfig,
    args: &Wcf2TikzArgs,
) -> Result<usize> {
    let options = config.tikz_options(args.polar, args.scale);
    let dir = args
        .toolchain
        .clone()
        .unwrap_or_else(|| config.planar.toolchain_dir.clone());

    let embedder = match planar_embedder(&dir, &config.planar.command) {
        Ok(embedder) => Some(embedder),
        Err(e) => {
            warn!("{e}");
            writeln!(output, "{MISSING_TOOLS_WARNING}")?;
            if args.planar {
                return Err(e).context("the -p option is not available");
            }
            None
        }
    };
    let layout = match &embedder {
        Some(embedder) if args.planar => Layout::Planar(embedder),
        _ => Layout::Circular,
    };

    let mut count = 0;
    for graph in WcfReader::new(input) {
        let number = count + 1;
        let graph = graph.with_context(|| format!("decoding graph {number}"))?;
        let picture = graph_to_tikz(&graph, layout, &options)
            .with_context(|| format!("drawing graph {number}"))?;
        output.write_all(picture.as_bytes())?;
        count = number;
    }
    output.flush()?;
    Ok(count)
}
