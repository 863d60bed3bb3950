//! TikZ picture emission.


use wcf_core::{Graph, Relation};

use crate::error::Result;
use crate::layout::{Layout, Point};
use crate::printer::{NodePrinter, DEFAULT_SCALE};

/// Rendering options shared by all pictures in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TikzOptions {
    pub printer: NodePrinter,
    pub scale: f64,
}

impl Default for TikzOptions {
    fn default() -> Self {
        Self {
            printer: NodePrinter::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

/// The `\draw` directive for one relationship.
pub fn edge_directive(relation: &Relation) -> String {
    match relation {
        Relation::Directed { src, dst } => format!("\\draw[->] ({src}) to ({dst});"),
        Relation::Mutual { a, b } => format!("\\draw[<->] ({a}) to ({b});"),
    }
}

/// Render a picture from already computed node positions.
pub fn render(graph: &Graph, points: &[Point], options: &TikzOptions) -> String {
    let mut out = String::new();
    out.push_str("\\begin{tikzpicture}\n\n");
    for (i, &point) in points.iter().enumerate() {
        out.push_str(&options.printer.node(i, point, options.scale));
        out.push('\n');
    }
    out.push('\n');
    for relation in graph.relations() {
        out.push_str(&edge_directive(&relation));
        out.push('\n');
    }
    out.push_str("\\end{tikzpicture}\n\n");
    out
}

/// Place the nodes with `layout` and render the picture.
///
/// Nothing is produced if the layout fails.
pub fn graph_to_tikz(graph: &Graph, layout: Layout<'_>, options: &TikzOptions) -> Result<String> {
    let points = layout.place(graph)?;
    Ok(render(graph, &points, options))
}
