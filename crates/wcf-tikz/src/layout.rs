//! Node placement: points, the circular layout and the planar capability.

use wcf_core::Graph;

use crate::error::{EmbedError, Result};

/// A node position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Point {
    /// Plane coordinates as produced by a planar embedder.
    Cartesian { x: f64, y: f64 },
    /// Angle in degrees and radius.
    Polar { angle: f64, radius: f64 },
}

impl Point {
    /// Polar form of this point, angle in degrees in (-180, 180].
    pub fn to_polar(self) -> (f64, f64) {
        match self {
            Point::Cartesian { x, y } => (y.atan2(x).to_degrees(), x.hypot(y)),
            Point::Polar { angle, radius } => (angle, radius),
        }
    }
}

/// Anything that can place the nodes of a graph in the plane without
/// crossing edges.
pub trait PlanarEmbedder {
    /// One point per node, in node order. Fails if the graph is not planar.
    fn embed(&self, graph: &Graph) -> Result<Vec<Point>>;
}

/// Which layout strategy to use.
#[derive(Clone, Copy)]
pub enum Layout<'a> {
    /// Nodes evenly spaced on the unit circle.
    Circular,
    /// Coordinates from a planar embedder.
    Planar(&'a dyn PlanarEmbedder),
}

impl std::fmt::Debug for Layout<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Circular => f.write_str("Circular"),
            Layout::Planar(_) => f.write_str("Planar"),
        }
    }
}

impl Layout<'_> {
    /// Place every node of `graph`.
    pub fn place(&self, graph: &Graph) -> Result<Vec<Point>> {
        match self {
            Layout::Circular => Ok(circular(graph.order())),
            Layout::Planar(embedder) => {
                let points = embedder.embed(graph)?;
                if points.len() != graph.order() {
                    return Err(EmbedError::failure(format!(
                        "expected {} coordinates, got {}",
                        graph.order(),
                        points.len()
                    )));
                }
                Ok(points)
            }
        }
    }
}

/// Node `i` at `i * 360 / order` degrees on the unit circle.
pub fn circular(order: usize) -> Vec<Point> {
    (0..order)
        .map(|i| Point::Polar {
            angle: i as f64 * 360.0 / order as f64,
            radius: 1.0,
        })
        .collect()
}

/// Embedder returning preset coordinates, whatever the graph.
#[derive(Debug, Clone, Default)]
pub struct FixedEmbedder {
    points: Vec<(f64, f64)>,
}

impl FixedEmbedder {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }
}

impl PlanarEmbedder for FixedEmbedder {
    fn embed(&self, _graph: &Graph) -> Result<Vec<Point>> {
        Ok(self
            .points
            .iter()
            .map(|&(x, y)| Point::Cartesian { x, y })
            .collect())
    }
}
