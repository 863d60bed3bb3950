//! Byte and text codecs for watercluster graphs.
//!
//! ## Watercluster record layout
//!
//! ```text
//! WCF record:
//! ┌──────────────────────────────┐
//! │ order: u8 (0..=255)          │  1 byte
//! ├──────────────────────────────┤
//! │ node 0: (neighbour + 1)* 0   │
//! │ node 1: (neighbour + 1)* 0   │
//! │ ...                          │  one 0-terminated list per node
//! │ node order-1                 │
//! └──────────────────────────────┘
//! ```
//!
//! Records are self-delimiting and are concatenated without separators. The
//! multi_code stream reuses the same framing for undirected edges (each pair
//! stored once, from its smaller endpoint, last node omitted) behind a
//! `>>multi_code<<` header.

mod error;

pub mod adjlist;
pub mod digraph6;
pub mod multi_code;
pub mod wcf;

pub use adjlist::{AdjacencyOptions, AdjacencyReader};
pub use digraph6::Digraph6Reader;
pub use error::{FormatError, Result};
pub use multi_code::MultiCodeWriter;
pub use wcf::{DecodeMode, WcfReader};
