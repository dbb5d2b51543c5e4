//! Graph construction, layout, routing, and fit-to-width search

mod arrow;
mod fit;
mod layout;
mod sides;

pub use arrow::draw_arrow;
pub use fit::{fit_to_width, max_line_width, Plan};
pub use layout::{render_diagram, Edge, Graph, Node};
pub use sides::{resolve_sides, SideChoice, SidePair};
