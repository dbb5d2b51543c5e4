//! Bowline - render flowchart markup as ASCII diagrams
//!
//! A library for parsing mermaid-flavoured flowchart syntax and laying it
//! out as a character-grid diagram.
//!
//! # Quick Start
//!
//! ```rust
//! use bowline::render;
//!
//! let diagram = render("graph LR; A --> B").unwrap();
//! println!("{}", diagram);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, parse and render separately:
//!
//! ```rust
//! use bowline::prelude::*;
//!
//! let spec = bowline::parse("graph LR; A -->|yes| B").unwrap();
//! assert_eq!(spec.node_count(), 2);
//!
//! let config = RenderConfig {
//!     charset: CharacterSet::Ascii,
//!     max_width: 60,
//!     ..RenderConfig::default()
//! };
//! let diagram = bowline::render_spec(&spec, &config);
//! assert!(diagram.contains('>'));
//! ```

pub mod core;
pub mod graph;
pub mod parser;

pub use self::core::*;
pub use parser::{parse_diagram, ChildLink, DiagramSpec};

use graph::fit_to_width;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CharacterSet, DiagramError, Direction, DrawingCoord, EdgeLabelPolicy, Flow, GridCoord,
        RenderConfig, StyleClass,
    };
    pub use crate::graph::{fit_to_width, SideChoice, SidePair};
    pub use crate::parser::{parse_diagram, DiagramSpec};
}

/// Render flowchart syntax to an ASCII diagram with default settings.
///
/// # Example
/// ```rust
/// use bowline::render;
///
/// let diagram = render("graph LR; Start --> End").unwrap();
/// assert!(diagram.contains("Start"));
/// assert!(diagram.contains("End"));
/// ```
pub fn render(input: &str) -> anyhow::Result<String> {
    render_with_config(input, &RenderConfig::default())
}

/// Render flowchart syntax with an explicit configuration.
///
/// When `config.max_width` is positive, the fit-to-width search re-renders
/// under progressively tighter plans until the output fits.
pub fn render_with_config(input: &str, config: &RenderConfig) -> anyhow::Result<String> {
    let spec = parser::parse_diagram(input)?;
    Ok(render_spec(&spec, config))
}

/// Render an already-parsed diagram.
///
/// Useful when the caller needs the parsed [`DiagramSpec`] as well, e.g.
/// to resolve style classes for terminal colorization.
pub fn render_spec(spec: &DiagramSpec, config: &RenderConfig) -> String {
    fit_to_width(spec, config)
}

/// Parse flowchart syntax without rendering.
///
/// # Example
/// ```rust
/// let spec = bowline::parse("graph TD; A --> B --> C").unwrap();
/// assert_eq!(spec.node_count(), 3);
/// ```
pub fn parse(input: &str) -> anyhow::Result<DiagramSpec> {
    Ok(parser::parse_diagram(input)?)
}
