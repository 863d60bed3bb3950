//! CLI command implementations.
//!
//! Every command reads its graphs from an input stream and writes data to an
//! output stream; reports meant for the user go to a separate report stream
//! (stderr in the binary) so that the data can be piped on.

pub mod adjlist2wcf;
pub mod doctor;
pub mod invariant;
pub mod show;
pub mod transform;
pub mod wcf2multi;
pub mod wcf2tikz;

use std::io::BufRead;

use clap::ValueEnum;
use wcf_core::Graph;
use wcf_format::{Digraph6Reader, WcfReader};

/// Report format for the inspection commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Directed graphs from a WCF stream, or from digraph6 lines when `digraph6`
/// is set.
pub fn directed_graphs<'a, R>(
    input: R,
    digraph6: bool,
) -> Box<dyn Iterator<Item = wcf_format::Result<Graph>> + 'a>
where
    R: BufRead + 'a,
{
    if digraph6 {
        Box::new(Digraph6Reader::new(input))
    } else {
        Box::new(WcfReader::new(input))
    }
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
