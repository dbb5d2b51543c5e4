//! Rendering configuration and glyph tables
//!
//! All layout parameters travel in an explicit [`RenderConfig`] value that
//! is threaded through every layout and routing call; there is no
//! process-wide rendering state.

use std::collections::HashMap;
use std::fmt;

/// Character set for rendering output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CharacterSet {
    /// Pure ASCII characters only: `+ - | / \ < > ^ v`
    Ascii,
    /// Unicode box-drawing characters: `┌ ┐ └ ┘ ─ │ ╱ ╲`
    #[default]
    Unicode,
}

impl CharacterSet {
    pub fn is_ascii(&self) -> bool {
        matches!(self, CharacterSet::Ascii)
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterSet::Ascii => write!(f, "ascii"),
            CharacterSet::Unicode => write!(f, "unicode"),
        }
    }
}

/// Primary flow orientation of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Flow {
    /// Left to right (row-major)
    #[default]
    LeftRight,
    /// Top down (column-major)
    TopDown,
}

impl Flow {
    /// Parse an orientation keyword (`LR`, `TD`, `TB`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "LR" => Some(Flow::LeftRight),
            "TD" | "TB" => Some(Flow::TopDown),
            _ => None,
        }
    }

    pub fn flipped(self) -> Flow {
        match self {
            Flow::LeftRight => Flow::TopDown,
            Flow::TopDown => Flow::LeftRight,
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flow::LeftRight => write!(f, "LR"),
            Flow::TopDown => write!(f, "TD"),
        }
    }
}

/// How edge labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgeLabelPolicy {
    /// Render labels as written (wrapped by the label wrap width).
    #[default]
    Full,
    /// Truncate labels to the wrap width with an ellipsis.
    Ellipsis,
    /// Omit edge labels entirely.
    Drop,
}

impl fmt::Display for EdgeLabelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLabelPolicy::Full => write!(f, "full"),
            EdgeLabelPolicy::Ellipsis => write!(f, "ellipsis"),
            EdgeLabelPolicy::Drop => write!(f, "drop"),
        }
    }
}

/// A named style class: attribute key to value, e.g. `color -> #ff0000`.
///
/// Classes are carried through rendering and applied to node text by the
/// terminal front end; the canvas itself stays a plain character grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleClass {
    pub name: String,
    pub attrs: HashMap<String, String>,
}

impl StyleClass {
    /// Parse the attribute string of a `classDef`: `fill:#f9f,color:#333`.
    pub fn parse(name: &str, attrs: &str) -> Self {
        let mut map = HashMap::new();
        for item in attrs.split(',') {
            let mut parts = item.splitn(2, ':');
            let key = parts.next().unwrap_or("").trim();
            let value = parts.next().unwrap_or("").trim();
            if !key.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
        Self {
            name: name.to_string(),
            attrs: map,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Glyph set for boxes and lines.
    pub charset: CharacterSet,
    /// Orientation override; `None` keeps the diagram's own header value.
    pub direction: Option<Flow>,
    /// Horizontal spacing between nodes, in cells.
    pub padding_x: i32,
    /// Vertical spacing between nodes, in cells.
    pub padding_y: i32,
    /// Padding between node text and its box border.
    pub box_border_padding: i32,
    /// Maximum output line width; 0 or negative means unbounded.
    pub max_width: i32,
    /// Wrap threshold for node labels; 0 disables wrapping.
    pub label_wrap_width: usize,
    /// How edge labels are rendered.
    pub edge_label_policy: EdgeLabelPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            charset: CharacterSet::default(),
            direction: None,
            padding_x: 5,
            padding_y: 4,
            box_border_padding: 1,
            max_width: 0,
            label_wrap_width: 30,
            edge_label_policy: EdgeLabelPolicy::default(),
        }
    }
}

/// Box drawing characters for node rectangles.
#[derive(Debug, Clone, Copy)]
pub struct BoxChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BoxChars {
    pub fn for_style(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    pub fn ascii() -> Self {
        Self {
            top_left: '+',
            top_right: '+',
            bottom_left: '+',
            bottom_right: '+',
            horizontal: '-',
            vertical: '|',
        }
    }

    pub fn unicode() -> Self {
        Self {
            top_left: '┌',
            top_right: '┐',
            bottom_left: '└',
            bottom_right: '┘',
            horizontal: '─',
            vertical: '│',
        }
    }
}

impl Default for BoxChars {
    fn default() -> Self {
        Self::unicode()
    }
}

/// Line, corner, arrowhead, and junction characters for edges.
#[derive(Debug, Clone, Copy)]
pub struct EdgeChars {
    pub horizontal: char,
    pub vertical: char,
    /// Diagonal rising left-to-right: `/`
    pub diag_up: char,
    /// Diagonal falling left-to-right: `\`
    pub diag_down: char,
    pub corner_top_left: char,
    pub corner_top_right: char,
    pub corner_bottom_left: char,
    pub corner_bottom_right: char,
    /// T-junctions painted where a line leaves a box border.
    pub tee_up: char,
    pub tee_down: char,
    pub tee_left: char,
    pub tee_right: char,
    pub arrow_up: char,
    pub arrow_down: char,
    pub arrow_left: char,
    pub arrow_right: char,
}

impl EdgeChars {
    pub fn for_style(style: CharacterSet) -> Self {
        if style.is_ascii() {
            Self::ascii()
        } else {
            Self::unicode()
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: '-',
            vertical: '|',
            diag_up: '/',
            diag_down: '\\',
            corner_top_left: '+',
            corner_top_right: '+',
            corner_bottom_left: '+',
            corner_bottom_right: '+',
            tee_up: '+',
            tee_down: '+',
            tee_left: '+',
            tee_right: '+',
            arrow_up: '^',
            arrow_down: 'v',
            arrow_left: '<',
            arrow_right: '>',
        }
    }

    pub fn unicode() -> Self {
        Self {
            horizontal: '─',
            vertical: '│',
            diag_up: '╱',
            diag_down: '╲',
            corner_top_left: '┌',
            corner_top_right: '┐',
            corner_bottom_left: '└',
            corner_bottom_right: '┘',
            tee_up: '┴',
            tee_down: '┬',
            tee_left: '┤',
            tee_right: '├',
            arrow_up: '▲',
            arrow_down: '▼',
            arrow_left: '◄',
            arrow_right: '►',
        }
    }
}

impl Default for EdgeChars {
    fn default() -> Self {
        Self::unicode()
    }
}
