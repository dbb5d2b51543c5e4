//! Diagram text parser
//!
//! Turns the textual diagram syntax into a [`DiagramSpec`]: an
//! insertion-ordered mapping from node name to labeled children, plus
//! named style classes and option overrides. The rendering pipeline only
//! ever sees this structure, never the raw text.

mod statements;
mod whitespace;

pub use statements::{ChainStmt, NodeRef, Statement, StatementParser};

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::core::{DiagramError, Flow, StyleClass};

/// A labeled child reference: one outgoing edge of a parent node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildLink {
    pub child: String,
    pub label: String,
}

/// The parsed diagram: everything rendering needs, in input order.
#[derive(Debug, Clone, Default)]
pub struct DiagramSpec {
    pub direction: Flow,
    /// Insertion-ordered node name -> outgoing labeled edges.
    pub children: IndexMap<String, Vec<ChildLink>>,
    /// Display label per node where it differs from the name.
    pub labels: HashMap<String, String>,
    /// Named style classes from `classDef`.
    pub classes: HashMap<String, StyleClass>,
    /// Style class applied to a node via `:::`.
    pub node_classes: HashMap<String, String>,
    /// `paddingX=` / `paddingY=` overrides from the input.
    pub padding_x: Option<i32>,
    pub padding_y: Option<i32>,
}

impl DiagramSpec {
    /// Number of distinct nodes referenced anywhere in the diagram.
    pub fn node_count(&self) -> usize {
        self.children.len()
    }

    /// Display label for a node: its own label if one was given, else the name.
    pub fn display_label<'a>(&'a self, name: &'a str) -> &'a str {
        self.labels.get(name).map(String::as_str).unwrap_or(name)
    }

    fn register_node(&mut self, node: &NodeRef) {
        self.children.entry(node.name.clone()).or_default();
        if let Some(label) = &node.label {
            // First writer wins, matching node identity semantics
            self.labels
                .entry(node.name.clone())
                .or_insert_with(|| label.clone());
        }
        if let Some(class) = &node.class {
            self.node_classes
                .entry(node.name.clone())
                .or_insert_with(|| class.clone());
        }
    }

    fn add_edge(&mut self, from: &NodeRef, to: &NodeRef, label: &Option<String>) {
        self.register_node(from);
        self.register_node(to);
        self.children
            .get_mut(&from.name)
            .expect("parent registered above")
            .push(ChildLink {
                child: to.name.clone(),
                label: label.clone().unwrap_or_default(),
            });
    }

    fn apply(&mut self, statement: &Statement) {
        match statement {
            Statement::ClassDef(name, class) => {
                self.classes.insert(name.clone(), class.clone());
            }
            Statement::Chain(chain) => {
                for node in &chain.head {
                    self.register_node(node);
                }
                let mut previous = &chain.head;
                for (label, group) in &chain.links {
                    for from in previous {
                        for to in group {
                            self.add_edge(from, to, label);
                        }
                    }
                    previous = group;
                }
            }
        }
    }
}

/// Parse diagram text into a [`DiagramSpec`].
///
/// The input must begin with a `graph`/`flowchart` header (after any
/// `paddingX=`/`paddingY=` overrides); statements follow one per line or
/// separated by `;`. `%%` starts a comment.
pub fn parse_diagram(input: &str) -> Result<DiagramSpec, DiagramError> {
    let parser = StatementParser::new();
    let mut spec = DiagramSpec::default();
    let mut seen_header = false;

    let normalized = input.replace("\\n", "\n");

    for (index, raw_line) in normalized.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line);
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        for segment in line.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            if !seen_header {
                if let Some((axis, value)) = parse_padding_directive(segment) {
                    trace!(axis = %axis, value, "padding override");
                    match axis {
                        'x' => spec.padding_x = Some(value),
                        _ => spec.padding_y = Some(value),
                    }
                    continue;
                }
                spec.direction = parse_header(segment, line_no)?;
                seen_header = true;
                continue;
            }

            let statement = parser.parse_statement(segment).map_err(|e| {
                DiagramError::parse_error(format!("invalid statement '{}': {}", segment, e), line_no)
            })?;
            spec.apply(&statement);
        }
    }

    if !seen_header {
        return Err(DiagramError::parse_error(
            "missing graph header (expected 'graph LR' or 'graph TD')",
            1,
        ));
    }

    debug!(
        nodes = spec.node_count(),
        direction = %spec.direction,
        "parsed diagram"
    );
    Ok(spec)
}

/// Parse the `graph`/`flowchart` header line; a bare header defaults to TD.
fn parse_header(segment: &str, line_no: usize) -> Result<Flow, DiagramError> {
    let mut parts = segment.split_whitespace();
    let keyword = parts.next().unwrap_or("");
    if !keyword.eq_ignore_ascii_case("graph") && !keyword.eq_ignore_ascii_case("flowchart") {
        return Err(DiagramError::parse_error(
            format!("expected graph header, found '{}'", segment),
            line_no,
        ));
    }

    match parts.next() {
        None => Ok(Flow::TopDown),
        Some(dir) => Flow::parse(dir).ok_or_else(|| {
            DiagramError::parse_error(
                format!("unsupported graph direction '{}' (use LR or TD)", dir),
                line_no,
            )
        }),
    }
}

fn parse_padding_directive(segment: &str) -> Option<(char, i32)> {
    let lower = segment.to_ascii_lowercase();
    let rest = lower.strip_prefix("paddingx=").map(|r| ('x', r));
    let rest = rest.or_else(|| lower.strip_prefix("paddingy=").map(|r| ('y', r)));
    let (axis, value) = rest?;
    value.trim().parse::<i32>().ok().map(|v| (axis, v))
}

fn strip_comment(line: &str) -> &str {
    match line.find("%%") {
        Some(idx) => &line[..idx],
        None => line,
    }
}
