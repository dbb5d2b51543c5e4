//! Command-line interface for the bowline utility
//!
//! Renders flowchart markup to ASCII diagrams on the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

use crate::colorizer::colorize_output;
use bowline::{CharacterSet, EdgeLabelPolicy, Flow, RenderConfig};

/// Bowline - render flowchart markup as ASCII diagrams
#[derive(Parser)]
#[command(name = "bowline")]
#[command(about = "A Rust utility to render flowchart markup as ASCII diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram to ASCII
    Render {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the diagram (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character set to use for rendering
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// Flow orientation override (defaults to the diagram header)
        #[arg(long, value_enum)]
        direction: Option<DirectionChoice>,

        /// Maximum output width; 0 disables fitting
        #[arg(long, default_value_t = 0)]
        max_width: i32,

        /// Horizontal spacing between nodes
        #[arg(long)]
        padding_x: Option<i32>,

        /// Vertical spacing between nodes
        #[arg(long)]
        padding_y: Option<i32>,

        /// Padding between node text and its box border
        #[arg(long)]
        box_padding: Option<i32>,

        /// Wrap node labels longer than this many columns (0 disables)
        #[arg(long)]
        wrap: Option<usize>,

        /// Edge label rendering policy
        #[arg(long, value_enum, default_value_t = LabelChoice::Full)]
        edge_labels: LabelChoice,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Validate diagram syntax without rendering
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Supported output character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// Flow orientations
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum DirectionChoice {
    Lr,
    Td,
}

impl From<DirectionChoice> for Flow {
    fn from(value: DirectionChoice) -> Self {
        match value {
            DirectionChoice::Lr => Flow::LeftRight,
            DirectionChoice::Td => Flow::TopDown,
        }
    }
}

/// Edge label policies
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum LabelChoice {
    #[default]
    Full,
    Ellipsis,
    Drop,
}

impl From<LabelChoice> for EdgeLabelPolicy {
    fn from(value: LabelChoice) -> Self {
        match value {
            LabelChoice::Full => EdgeLabelPolicy::Full,
            LabelChoice::Ellipsis => EdgeLabelPolicy::Ellipsis,
            LabelChoice::Drop => EdgeLabelPolicy::Drop,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct BowlineApp;

impl BowlineApp {
    pub fn new() -> Self {
        Self
    }

    /// Run the application with the given CLI arguments
    pub fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Render {
                input,
                output,
                style,
                direction,
                max_width,
                padding_x,
                padding_y,
                box_padding,
                wrap,
                edge_labels,
                color,
            } => {
                let text = read_input(input.as_deref())?;

                let defaults = RenderConfig::default();
                let config = RenderConfig {
                    charset: style.into(),
                    direction: direction.map(Into::into),
                    padding_x: padding_x.unwrap_or(defaults.padding_x),
                    padding_y: padding_y.unwrap_or(defaults.padding_y),
                    box_border_padding: box_padding.unwrap_or(defaults.box_border_padding),
                    max_width,
                    label_wrap_width: wrap.unwrap_or(defaults.label_wrap_width),
                    edge_label_policy: edge_labels.into(),
                };

                tracing::debug!(
                    style = %config.charset,
                    max_width = config.max_width,
                    "rendering diagram"
                );
                let spec = bowline::parse(&text)?;
                let mut rendered = bowline::render_spec(&spec, &config);

                if should_colorize(color, output.as_deref()) {
                    rendered = colorize_output(&rendered, &spec);
                }

                write_output(output.as_deref(), &rendered)?;
                Ok(())
            }
            Commands::Validate { input } => {
                let text = read_input(input.as_deref())?;
                match bowline::parse(&text) {
                    Ok(spec) => {
                        println!(
                            "OK: {} node(s), {} edge(s)",
                            spec.node_count(),
                            spec.children.values().map(Vec::len).sum::<usize>()
                        );
                        Ok(())
                    }
                    Err(e) => Err(e.context("invalid diagram")),
                }
            }
        }
    }
}

impl Default for BowlineApp {
    fn default() -> Self {
        Self::new()
    }
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
        Some(p) if p.as_os_str() == "-" => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
        Some(p) => fs::read_to_string(p)
            .with_context(|| format!("failed to read input file {}", p.display())),
    }
}

fn write_output(path: Option<&std::path::Path>, rendered: &str) -> Result<()> {
    match path {
        None => {
            println!("{}", rendered);
            Ok(())
        }
        Some(p) if p.as_os_str() == "-" => {
            println!("{}", rendered);
            Ok(())
        }
        Some(p) => {
            let mut file = fs::File::create(p)
                .with_context(|| format!("failed to create output file {}", p.display()))?;
            writeln!(file, "{}", rendered)?;
            Ok(())
        }
    }
}

fn should_colorize(choice: ColorChoice, output: Option<&std::path::Path>) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            output.is_none()
                && std::env::var_os("NO_COLOR").is_none()
                && io::stdout().is_terminal()
        }
    }
}
