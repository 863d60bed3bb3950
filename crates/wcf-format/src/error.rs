//! Error types for the graph codecs.

use std::io;

use thiserror::Error;
use wcf_core::{GraphError, MAX_ORDER};

/// Convenience alias for results within the format crate.
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors that can occur while reading or writing graph streams.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("graph of order {order} cannot be encoded (at most {max} nodes)", max = MAX_ORDER)]
    GraphTooLarge { order: usize },

    #[error("stream ended inside graph {graph}: expected {expected} {unit}, found {found}")]
    TruncatedStream {
        /// 1-based number of the record being read.
        graph: usize,
        expected: usize,
        found: usize,
        unit: &'static str,
    },

    /// `neighbor` is the 0-based index the input resolved to.
    #[error("invalid neighbour index {neighbor} for node {node} in a graph of order {order}")]
    InvalidNeighborIndex {
        node: usize,
        neighbor: i64,
        order: usize,
    },

    #[error("malformed input on line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<GraphError> for FormatError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidNeighborIndex {
                node,
                neighbor,
                order,
            } => FormatError::InvalidNeighborIndex {
                node,
                neighbor: neighbor as i64,
                order,
            },
        }
    }
}

/// Fail with [`FormatError::GraphTooLarge`] if `order` does not fit in a byte.
pub(crate) fn check_order(order: usize) -> Result<u8> {
    u8::try_from(order).map_err(|_| FormatError::GraphTooLarge { order })
}
