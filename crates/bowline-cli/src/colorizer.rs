//! Terminal colorization for diagram output
//!
//! Applies ANSI escape codes with crossterm: structural glyphs get fixed
//! colors, node labels get the color of their style class when one is
//! defined.

use crossterm::style::{Color, Stylize};

use bowline::DiagramSpec;

/// Colorize diagram output for a terminal.
///
/// Box-drawing and line glyphs turn cyan, arrowheads yellow; node labels
/// whose style class carries a `color` attribute are tinted with it.
pub fn colorize_output(input: &str, spec: &DiagramSpec) -> String {
    let tints = node_tints(spec);
    let mut result = String::with_capacity(input.len() * 2);

    for line in input.lines() {
        let tinted = tint_labels(line, &tints);
        for c in tinted.chars() {
            match c {
                '┌' | '┐' | '└' | '┘' | '├' | '┤' | '┬' | '┴' | '┼' | '─' | '│' | '╱' | '╲' => {
                    result.push_str(&format!("{}", c.to_string().with(Color::Cyan)));
                }
                '+' | '-' | '|' | '/' | '\\' if is_box_char_context(line, c) => {
                    result.push_str(&format!("{}", c.to_string().with(Color::Cyan)));
                }
                '>' | '<' | 'v' | '^' | '►' | '◄' | '▼' | '▲' => {
                    result.push_str(&format!("{}", c.to_string().with(Color::Yellow)));
                }
                _ => result.push(c),
            }
        }
        result.push('\n');
    }

    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Resolve each styled node's display label to a terminal color.
fn node_tints(spec: &DiagramSpec) -> Vec<(String, Color)> {
    let mut tints = Vec::new();
    for (node, class_name) in &spec.node_classes {
        let Some(class) = spec.classes.get(class_name) else {
            continue;
        };
        let Some(hex) = class.attrs.get("color").or_else(|| class.attrs.get("fill")) else {
            continue;
        };
        if let Some(color) = parse_hex_color(hex) {
            tints.push((spec.display_label(node).to_string(), color));
        }
    }
    // Longest labels first so short labels never tint inside longer ones
    tints.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then(a.0.cmp(&b.0)));
    tints
}

/// Parse `#rgb` or `#rrggbb` into a crossterm RGB color.
fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    let (r, g, b) = match digits.len() {
        3 => {
            let mut it = digits.chars();
            let r = it.next()?.to_digit(16)? as u8;
            let g = it.next()?.to_digit(16)? as u8;
            let b = it.next()?.to_digit(16)? as u8;
            (r * 17, g * 17, b * 17)
        }
        6 => (
            u8::from_str_radix(&digits[0..2], 16).ok()?,
            u8::from_str_radix(&digits[2..4], 16).ok()?,
            u8::from_str_radix(&digits[4..6], 16).ok()?,
        ),
        _ => return None,
    };
    Some(Color::Rgb { r, g, b })
}

/// Whether an ASCII `+`, `-`, `|`, `/`, or `\` is structural rather than
/// part of a label on this line.
fn is_box_char_context(line: &str, c: char) -> bool {
    match c {
        '+' => line.contains("+-") || line.contains("-+") || line.contains("+ "),
        '-' => line.contains("--") || line.contains("+-") || line.contains("-+"),
        '|' => {
            let trimmed = line.trim_start();
            trimmed.starts_with('|') || line.contains("| ") || line.contains(" |")
        }
        _ => true,
    }
}

fn tint_labels(line: &str, tints: &[(String, Color)]) -> String {
    let mut line = line.to_string();
    for (label, color) in tints {
        if line.contains(label.as_str()) {
            let colored = format!("{}", label.clone().with(*color));
            line = line.replace(label.as_str(), &colored);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_spec() -> DiagramSpec {
        DiagramSpec::default()
    }

    #[test]
    fn test_colorize_adds_ansi_codes() {
        let output = colorize_output("+--+\n|A |\n+--+", &empty_spec());
        assert!(output.contains("\x1b["));
        assert!(output.contains('A'));
    }

    #[test]
    fn test_no_trailing_newline() {
        let output = colorize_output("plain", &empty_spec());
        assert!(!output.ends_with('\n'));
    }

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!(
            parse_hex_color("#f00"),
            Some(Color::Rgb { r: 255, g: 0, b: 0 })
        );
        assert_eq!(
            parse_hex_color("#102030"),
            Some(Color::Rgb {
                r: 16,
                g: 32,
                b: 48
            })
        );
        assert_eq!(parse_hex_color("f00"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_styled_label_is_tinted() {
        let spec = bowline::parse("graph LR\nclassDef hot color:#f00\nA:::hot --> B")
            .unwrap();
        let output = colorize_output("| A |", &spec);
        // The label picked up an RGB escape sequence
        assert!(output.contains("38;2;255;0;0"));
    }
}
