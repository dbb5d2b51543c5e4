//! Grid layout engine
//!
//! Consumes the parsed node/edge sequence in input order, assigns every
//! referenced node a position, and composes boxes and edges onto one
//! shared canvas. Placement is greedy and order-dependent: the first
//! child of a parent sits beside it along the flow axis, later children
//! stack along the cross axis under their previous sibling. No global
//! collision search happens.

use std::collections::HashMap;

use tracing::{debug, span, trace, Level};

use super::arrow::{self, corner_glyph, head_glyph};
use super::fit::Plan;
use super::sides::{resolve_sides, SidePair};
use crate::core::{
    display_width, truncate_label, wrap_label, BoxChars, Canvas, CharacterSet, Direction,
    DrawingCoord, EdgeChars, EdgeLabelPolicy, Flow, GridCoord, StyleClass,
};
use crate::parser::DiagramSpec;

/// Extra flow-axis clearance reserved beyond an edge label's width.
const LABEL_CLEARANCE: i32 = 4;

/// When a bent path's straight leg runs on a different axis than the box
/// side it exits from, the leg would slide along the box border. Pushing
/// the start one cell outward keeps the whole path clear of the box.
fn nudge_outward(from: DrawingCoord, to: DrawingCoord, exit: Direction) -> DrawingCoord {
    let diff_x = (to.x - from.x).abs();
    let diff_y = (to.y - from.y).abs();
    if diff_x == 0 || diff_y == 0 || diff_x == diff_y {
        return from;
    }
    let first_leg_vertical = diff_y > diff_x;
    let exit_vertical = matches!(exit, Direction::Up | Direction::Down);
    if first_leg_vertical == exit_vertical {
        return from;
    }
    let (ux, uy) = exit.unit();
    DrawingCoord::new(from.x + ux, from.y + uy)
}

/// A placed node.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub label_lines: Vec<String>,
    pub style_class: Option<StyleClass>,
    /// The node's rendered box, kept after it is merged onto the canvas.
    pub box_drawing: Canvas,
    pub grid: GridCoord,
    /// Top-left corner of the box on the shared canvas.
    pub coord: DrawingCoord,
    pub width: i32,
    pub height: i32,
    pub drawn: bool,
    /// Depth level from this node's root.
    pub depth: i32,
    /// Stable creation index.
    pub index: usize,
}

/// A directed, labeled connection between two placed nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub label: String,
}

/// The graph under construction: nodes, edges, and the one canvas they
/// are all drawn onto. Exclusively owned by a single render.
pub struct Graph<'a> {
    spec: &'a DiagramSpec,
    plan: &'a Plan,
    box_chars: BoxChars,
    edge_chars: EdgeChars,
    ascii: bool,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<String, usize>,
    /// Next free cross-axis slot per depth level, for grid coordinates.
    level_slots: HashMap<i32, i32>,
    /// Most recently created child per parent, for sibling stacking.
    last_child: HashMap<usize, usize>,
    canvas: Canvas,
    extent_x: i32,
    extent_y: i32,
}

/// Render one diagram under one plan, producing the serialized canvas.
pub fn render_diagram(spec: &DiagramSpec, plan: &Plan, charset: CharacterSet) -> String {
    let layout_span = span!(
        Level::DEBUG,
        "layout",
        nodes = spec.node_count(),
        direction = %plan.direction
    );
    let _enter = layout_span.enter();

    let mut graph = Graph::new(spec, plan, charset);
    graph.build();
    graph.into_string()
}

impl<'a> Graph<'a> {
    fn new(spec: &'a DiagramSpec, plan: &'a Plan, charset: CharacterSet) -> Self {
        Self {
            spec,
            plan,
            box_chars: BoxChars::for_style(charset),
            edge_chars: EdgeChars::for_style(charset),
            ascii: charset.is_ascii(),
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::new(),
            level_slots: HashMap::new(),
            last_child: HashMap::new(),
            canvas: Canvas::new(0, 0),
            extent_x: 0,
            extent_y: 0,
        }
    }

    fn build(&mut self) {
        let spec = self.spec;
        for (parent_name, links) in &spec.children {
            let parent = self.get_or_create_root(parent_name, links.iter().map(|l| &l.label));
            for link in links {
                let label = self.effective_label(&link.label);
                let child = self.get_or_create_child(parent, &link.child, &label);
                let edge = Edge {
                    from: parent,
                    to: child,
                    label,
                };
                self.draw_edge(&edge);
                self.edges.push(edge);
            }
        }
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            width = self.canvas.width(),
            height = self.canvas.height(),
            "graph composed"
        );
    }

    fn into_string(self) -> String {
        self.canvas.serialize()
    }

    /// Edge label as it will actually be rendered under the active policy.
    fn effective_label(&self, raw: &str) -> String {
        match self.plan.edge_label_policy {
            EdgeLabelPolicy::Full => raw.to_string(),
            EdgeLabelPolicy::Ellipsis => {
                let width = if self.plan.label_wrap_width > 0 {
                    self.plan.label_wrap_width
                } else {
                    12
                };
                truncate_label(raw, width, self.ascii)
            }
            EdgeLabelPolicy::Drop => String::new(),
        }
    }

    /// Look up a top-level node, creating and placing it if unseen.
    ///
    /// A repeated name always resolves to the existing node; only genuinely
    /// new names place a box.
    fn get_or_create_root<'l>(
        &mut self,
        name: &str,
        child_labels: impl Iterator<Item = &'l String>,
    ) -> usize {
        if let Some(&index) = self.node_index.get(name) {
            return index;
        }

        // Widest outgoing label claims flow-axis clearance for the edges
        // that will leave this root.
        let widest_label = child_labels
            .map(|l| display_width(&self.effective_label(l)) as i32)
            .max()
            .unwrap_or(0);
        let gap = if widest_label > 0 {
            self.plan.padding_x.max(widest_label + LABEL_CLEARANCE)
        } else {
            self.plan.padding_x
        };

        let coord = match self.plan.direction {
            Flow::LeftRight => {
                let x = if self.nodes.is_empty() {
                    0
                } else {
                    self.extent_x + gap
                };
                DrawingCoord::new(x, 0)
            }
            Flow::TopDown => {
                let y = if self.nodes.is_empty() {
                    0
                } else {
                    self.extent_y + self.plan.padding_y
                };
                DrawingCoord::new(0, y)
            }
        };

        let grid = self.claim_grid_slot(0);
        self.create_node(name, grid, coord, 0)
    }

    /// Look up a child node, creating and placing it if unseen.
    fn get_or_create_child(&mut self, parent: usize, name: &str, edge_label: &str) -> usize {
        if let Some(&index) = self.node_index.get(name) {
            return index;
        }

        let label_len = display_width(edge_label) as i32;
        let depth = self.nodes[parent].depth + 1;

        let coord = match self.last_child.get(&parent).copied() {
            // Later children stack under the previous sibling on the
            // cross axis.
            Some(prev) => {
                let prev = &self.nodes[prev];
                match self.plan.direction {
                    Flow::LeftRight => DrawingCoord::new(
                        prev.coord.x,
                        prev.coord.y + prev.height + self.plan.padding_y,
                    ),
                    Flow::TopDown => DrawingCoord::new(
                        prev.coord.x + prev.width + self.plan.padding_x,
                        prev.coord.y,
                    ),
                }
            }
            // The first child sits directly beside its parent along the
            // flow axis, with room for the edge label if it is wider than
            // the configured padding.
            None => {
                let parent_node = &self.nodes[parent];
                match self.plan.direction {
                    Flow::LeftRight => {
                        let gap = if label_len > self.plan.padding_x {
                            label_len + LABEL_CLEARANCE
                        } else {
                            self.plan.padding_x
                        };
                        DrawingCoord::new(
                            parent_node.coord.x + parent_node.width + gap,
                            parent_node.coord.y,
                        )
                    }
                    Flow::TopDown => DrawingCoord::new(
                        parent_node.coord.x,
                        parent_node.coord.y + parent_node.height + self.plan.padding_y,
                    ),
                }
            }
        };

        let grid = self.claim_grid_slot(depth);
        let index = self.create_node(name, grid, coord, depth);
        self.last_child.insert(parent, index);
        index
    }

    /// Grid coordinate for the next node at a depth level: column = depth,
    /// row = running slot at that level (transposed for top-down flow).
    fn claim_grid_slot(&mut self, depth: i32) -> GridCoord {
        let slot = self.level_slots.entry(depth).or_insert(0);
        let taken = *slot;
        *slot += 1;
        match self.plan.direction {
            Flow::LeftRight => GridCoord::new(depth, taken),
            Flow::TopDown => GridCoord::new(taken, depth),
        }
    }

    /// Build the node, draw its box, and merge it onto the shared canvas.
    fn create_node(
        &mut self,
        name: &str,
        grid: GridCoord,
        coord: DrawingCoord,
        depth: i32,
    ) -> usize {
        let label_lines = wrap_label(self.spec.display_label(name), self.plan.label_wrap_width);
        let inner_width = label_lines
            .iter()
            .map(|l| display_width(l) as i32)
            .max()
            .unwrap_or(0);
        let pad = self.plan.box_border_padding;
        let width = inner_width + 2 * pad + 2;
        let height = label_lines.len() as i32 + 2 * pad + 2;

        let style_class = self
            .spec
            .node_classes
            .get(name)
            .and_then(|class| self.spec.classes.get(class))
            .cloned();

        let index = self.nodes.len();
        let mut node = Node {
            name: name.to_string(),
            label_lines,
            style_class,
            box_drawing: Canvas::new(0, 0),
            grid,
            coord,
            width,
            height,
            drawn: false,
            depth,
            index,
        };
        trace!(name, ?grid, x = coord.x, y = coord.y, "placed node");

        node.box_drawing = self.draw_box(&node);
        self.canvas = Canvas::merge(&self.canvas, &node.box_drawing, coord);
        self.extent_x = self.extent_x.max(coord.x + width);
        self.extent_y = self.extent_y.max(coord.y + height);

        node.drawn = true;
        self.nodes.push(node);
        self.node_index.insert(name.to_string(), index);
        index
    }

    /// Render one node's box on its own canvas: borders, border padding,
    /// centered label lines.
    fn draw_box(&self, node: &Node) -> Canvas {
        let w = node.width;
        let h = node.height;
        let chars = &self.box_chars;
        let mut drawing = Canvas::new(w as usize - 1, h as usize - 1);

        for x in 1..w - 1 {
            drawing.set(DrawingCoord::new(x, 0), chars.horizontal);
            drawing.set(DrawingCoord::new(x, h - 1), chars.horizontal);
        }
        for y in 1..h - 1 {
            drawing.set(DrawingCoord::new(0, y), chars.vertical);
            drawing.set(DrawingCoord::new(w - 1, y), chars.vertical);
        }
        drawing.set(DrawingCoord::new(0, 0), chars.top_left);
        drawing.set(DrawingCoord::new(w - 1, 0), chars.top_right);
        drawing.set(DrawingCoord::new(0, h - 1), chars.bottom_left);
        drawing.set(DrawingCoord::new(w - 1, h - 1), chars.bottom_right);

        let top = 1 + self.plan.box_border_padding;
        for (i, line) in node.label_lines.iter().enumerate() {
            let line_width = display_width(line) as i32;
            let x = (w - line_width) / 2;
            drawing.draw_text(DrawingCoord::new(x, top + i as i32), line);
        }

        drawing
    }

    /// Midpoint of one side of a node's box.
    fn border_point(&self, node: &Node, side: Direction) -> DrawingCoord {
        let x = node.coord.x;
        let y = node.coord.y;
        let w = node.width;
        let h = node.height;
        match side {
            Direction::Up => DrawingCoord::new(x + w / 2, y),
            Direction::Down => DrawingCoord::new(x + w / 2, y + h - 1),
            Direction::Left => DrawingCoord::new(x, y + h / 2),
            Direction::Right => DrawingCoord::new(x + w - 1, y + h / 2),
            // The side resolver only hands out axis sides.
            _ => DrawingCoord::new(x + w / 2, y + h / 2),
        }
    }

    /// Tee junction where a line leaves a box border (Unicode only).
    fn draw_tee(&mut self, at: DrawingCoord, exit: Direction) {
        if self.ascii {
            return;
        }
        let glyph = match exit {
            Direction::Up => self.edge_chars.tee_up,
            Direction::Down => self.edge_chars.tee_down,
            Direction::Left => self.edge_chars.tee_left,
            Direction::Right => self.edge_chars.tee_right,
            _ => return,
        };
        self.canvas.set(at, glyph);
    }

    fn draw_edge(&mut self, edge: &Edge) {
        let from = &self.nodes[edge.from];
        let to = &self.nodes[edge.to];
        let self_loop = edge.from == edge.to;
        let choice = resolve_sides(from.grid, to.grid, self.plan.direction, self_loop);
        let pair = choice.preferred;

        if self_loop {
            self.draw_self_loop(edge.from, pair, &edge.label);
            return;
        }
        if pair.exit == pair.entry {
            self.draw_rerouted(edge.from, edge.to, pair, &edge.label);
            return;
        }

        let from_pt = self.border_point(from, pair.exit);
        let to_pt = self.border_point(to, pair.entry);
        let start = nudge_outward(from_pt, to_pt, pair.exit);
        let label = (!edge.label.is_empty()).then_some(edge.label.as_str());
        arrow::draw_arrow(&mut self.canvas, start, to_pt, label, &self.edge_chars);
        self.draw_tee(from_pt, pair.exit);
    }

    /// Backward edges route around the outside of the boxes: out of the
    /// shared side of both boxes, along a rail beyond them, and back in.
    fn draw_rerouted(&mut self, from: usize, to: usize, pair: SidePair, label: &str) {
        let f = self.border_point(&self.nodes[from], pair.exit);
        let t = self.border_point(&self.nodes[to], pair.entry);
        let chars = self.edge_chars;

        match pair.exit {
            Direction::Down => {
                // Below both boxes, leftward, then up into the target.
                let rail_y = f.y.max(t.y) + 1;
                let toward = if t.x < f.x {
                    Direction::Left
                } else {
                    Direction::Right
                };
                self.canvas
                    .draw_line(f, DrawingCoord::new(f.x, rail_y), 1, 0, &chars);
                self.canvas.set(
                    DrawingCoord::new(f.x, rail_y),
                    corner_glyph(Direction::Down, toward, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(f.x, rail_y),
                    DrawingCoord::new(t.x, rail_y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(t.x, rail_y),
                    corner_glyph(toward, Direction::Up, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(t.x, rail_y),
                    t,
                    1,
                    -1,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(t.x, t.y + 1),
                    head_glyph(Direction::Up, &chars),
                );
                if !label.is_empty() {
                    let mid_x = (f.x + t.x) / 2;
                    let width = display_width(label) as i32;
                    self.canvas.draw_text(
                        DrawingCoord::new(mid_x - width / 2, rail_y + 1),
                        label,
                    );
                }
            }
            Direction::Right => {
                // Right of both boxes, along a vertical rail, back in.
                let rail_x = f.x.max(t.x) + 1;
                let toward = if t.y < f.y {
                    Direction::Up
                } else {
                    Direction::Down
                };
                self.canvas
                    .draw_line(f, DrawingCoord::new(rail_x, f.y), 1, 0, &chars);
                self.canvas.set(
                    DrawingCoord::new(rail_x, f.y),
                    corner_glyph(Direction::Right, toward, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(rail_x, f.y),
                    DrawingCoord::new(rail_x, t.y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(rail_x, t.y),
                    corner_glyph(toward, Direction::Left, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(rail_x, t.y),
                    t,
                    1,
                    -1,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(t.x + 1, t.y),
                    head_glyph(Direction::Left, &chars),
                );
                if !label.is_empty() {
                    let mid_y = (f.y + t.y) / 2;
                    self.canvas
                        .draw_text(DrawingCoord::new(rail_x + 2, mid_y), label);
                }
            }
            _ => {}
        }
        self.draw_tee(f, pair.exit);
    }

    /// A self-referencing edge hooks out of one side and back into the
    /// adjacent one.
    fn draw_self_loop(&mut self, node: usize, pair: SidePair, label: &str) {
        let chars = self.edge_chars;
        let exit_pt = self.border_point(&self.nodes[node], pair.exit);
        let entry_pt = self.border_point(&self.nodes[node], pair.entry);

        match (pair.exit, pair.entry) {
            (Direction::Right, Direction::Down) => {
                let elbow_x = exit_pt.x + 2;
                let rail_y = entry_pt.y + 1;
                self.canvas
                    .draw_line(exit_pt, DrawingCoord::new(elbow_x, exit_pt.y), 1, 0, &chars);
                self.canvas.set(
                    DrawingCoord::new(elbow_x, exit_pt.y),
                    corner_glyph(Direction::Right, Direction::Down, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(elbow_x, exit_pt.y),
                    DrawingCoord::new(elbow_x, rail_y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(elbow_x, rail_y),
                    corner_glyph(Direction::Down, Direction::Left, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(elbow_x, rail_y),
                    DrawingCoord::new(entry_pt.x, rail_y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(entry_pt.x, rail_y),
                    head_glyph(Direction::Up, &chars),
                );
                if !label.is_empty() {
                    self.canvas.draw_text(
                        DrawingCoord::new(elbow_x + 2, (exit_pt.y + rail_y) / 2),
                        label,
                    );
                }
            }
            (Direction::Down, Direction::Right) => {
                let rail_y = exit_pt.y + 1;
                let elbow_x = entry_pt.x + 2;
                self.canvas
                    .draw_line(exit_pt, DrawingCoord::new(exit_pt.x, rail_y), 1, 0, &chars);
                self.canvas.set(
                    DrawingCoord::new(exit_pt.x, rail_y),
                    corner_glyph(Direction::Down, Direction::Right, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(exit_pt.x, rail_y),
                    DrawingCoord::new(elbow_x, rail_y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(elbow_x, rail_y),
                    corner_glyph(Direction::Right, Direction::Up, &chars),
                );
                self.canvas.draw_line(
                    DrawingCoord::new(elbow_x, rail_y),
                    DrawingCoord::new(elbow_x, entry_pt.y),
                    1,
                    0,
                    &chars,
                );
                self.canvas.set(
                    DrawingCoord::new(elbow_x, entry_pt.y),
                    corner_glyph(Direction::Up, Direction::Left, &chars),
                );
                self.canvas.set(
                    DrawingCoord::new(entry_pt.x + 1, entry_pt.y),
                    head_glyph(Direction::Left, &chars),
                );
                if !label.is_empty() {
                    self.canvas.draw_text(
                        DrawingCoord::new(elbow_x + 2, (entry_pt.y + rail_y) / 2),
                        label,
                    );
                }
            }
            _ => {}
        }
        self.draw_tee(exit_pt, pair.exit);
    }
}
