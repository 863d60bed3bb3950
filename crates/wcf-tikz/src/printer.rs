//! Node printers: how a placed node becomes a `\node` directive.

use crate::layout::Point;

/// Default factor between embedding units and TikZ units.
pub const DEFAULT_SCALE: f64 = 10.0;

/// Coordinate notation for planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodePrinter {
    /// `(x,y)`
    #[default]
    Cartesian,
    /// `(angle:radius)`
    Polar,
}

impl NodePrinter {
    /// Render node `index` placed at `point`.
    ///
    /// Polar points are taken as final and printed unscaled in both modes;
    /// only coordinates that came out of an embedder are scaled.
    pub fn node(&self, index: usize, point: Point, scale: f64) -> String {
        match (self, point) {
            (_, Point::Polar { angle, radius }) => {
                format!("\\node ({index}) at ({angle:?}:{radius}) {{}};")
            }
            (NodePrinter::Cartesian, Point::Cartesian { x, y }) => {
                format!(
                    "\\node ({index}) at ({:.3},{:.3}) {{}};",
                    scale * x,
                    scale * y
                )
            }
            (NodePrinter::Polar, cartesian) => {
                let (angle, radius) = cartesian.to_polar();
                format!(
                    "\\node ({index}) at ({angle:.5}:{:.3}) {{}};",
                    scale * radius
                )
            }
        }
    }
}
