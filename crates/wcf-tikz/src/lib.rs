//! TikZ rendering of watercluster graphs.
//!
//! Nodes are placed either on a circle or by a [`PlanarEmbedder`]; edges are
//! drawn once per relationship, with a double-headed arrow for mutual pairs.

mod error;

pub mod layout;
pub mod planar;
pub mod printer;
pub mod tikz;

pub use error::{EmbedError, Result};
pub use layout::{FixedEmbedder, Layout, PlanarEmbedder, Point};
pub use planar::ExternalEmbedder;
pub use printer::{NodePrinter, DEFAULT_SCALE};
pub use tikz::{graph_to_tikz, render, TikzOptions};
