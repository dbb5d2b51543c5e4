//! Arrow routing
//!
//! Draws the connector and arrowhead between two box-border coordinates.
//! Paths are one straight segment, one pure diagonal, or a single bend
//! whose final leg is a true 45° diagonal. Labels are placed off the
//! line; arrowheads overwrite the last line glyph, one cell before the
//! destination along the approach axis.
//!
//! Callers guarantee distinct, pre-offset endpoints, so no invalid-input
//! path exists here; re-invoking with identical arguments repaints the
//! same cells.

use crate::core::{classify, display_width, Canvas, Direction, DrawingCoord, EdgeChars};

/// Draw one connector plus one arrowhead from `from` to `to`, with an
/// optional label placed clear of the line.
pub fn draw_arrow(
    canvas: &mut Canvas,
    from: DrawingCoord,
    to: DrawingCoord,
    label: Option<&str>,
    chars: &EdgeChars,
) {
    let dir = classify(from, to);
    if dir == Direction::Middle {
        return;
    }

    let diff_x = (to.x - from.x).abs();
    let diff_y = (to.y - from.y).abs();

    if dir.is_axis_aligned() {
        let drawn = canvas.draw_line(from, to, 1, -1, chars);
        paint_head(canvas, &drawn, to, dir, chars);
        if let Some(text) = label {
            place_axis_label(canvas, from, to, dir, text);
        }
        return;
    }

    if diff_x == diff_y {
        // One unbroken diagonal run, no bend.
        let drawn = canvas.draw_line(from, to, 1, -1, chars);
        paint_head(canvas, &drawn, to, dir, chars);
        if let Some(text) = label {
            let mid = DrawingCoord::new((from.x + to.x) / 2, (from.y + to.y) / 2);
            canvas.draw_text(DrawingCoord::new(mid.x + 2, mid.y), text);
        }
        return;
    }

    // Bent path: straight leg first, then a leg with equal horizontal and
    // vertical run. The corner absorbs the surplus of the larger delta.
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();
    let corner = if diff_y > diff_x {
        DrawingCoord::new(from.x, to.y - sy * diff_x)
    } else {
        DrawingCoord::new(to.x - sx * diff_y, from.y)
    };

    let first = canvas.draw_line(from, corner, 1, 0, chars);
    let second = canvas.draw_line(corner, to, 0, -1, chars);

    let final_dir = classify(corner, to);
    if second.is_empty() {
        paint_head(canvas, &first, to, final_dir, chars);
    } else {
        paint_head(canvas, &second, to, final_dir, chars);
    }

    if let Some(text) = label {
        place_bent_label(canvas, from, corner, diff_x, diff_y, sy, text);
    }
}

/// Corner glyph for a turn from `prev` travel direction into `next`.
pub(crate) fn corner_glyph(prev: Direction, next: Direction, chars: &EdgeChars) -> char {
    use Direction::*;
    match (prev, next) {
        (Right, Down) | (Up, Left) => chars.corner_top_right,
        (Right, Up) | (Down, Left) => chars.corner_bottom_right,
        (Left, Down) | (Up, Right) => chars.corner_top_left,
        (Left, Up) | (Down, Right) => chars.corner_bottom_left,
        _ => chars.corner_top_left,
    }
}

/// Arrowhead glyph for an approach direction. Diagonal arrivals use the
/// vertical component, so an Upper-Right final leg still paints `^`.
pub(crate) fn head_glyph(dir: Direction, chars: &EdgeChars) -> char {
    match dir {
        Direction::Up => chars.arrow_up,
        Direction::Down => chars.arrow_down,
        Direction::Left => chars.arrow_left,
        Direction::Right => chars.arrow_right,
        _ => match dir.vertical_component() {
            Some(Direction::Up) => chars.arrow_up,
            Some(Direction::Down) => chars.arrow_down,
            _ => chars.arrow_right,
        },
    }
}

fn paint_head(
    canvas: &mut Canvas,
    drawn: &[DrawingCoord],
    to: DrawingCoord,
    dir: Direction,
    chars: &EdgeChars,
) {
    let glyph = head_glyph(dir, chars);
    let pos = match drawn.last() {
        Some(&last) => last,
        None => {
            // The offsets consumed the whole run (adjacent boxes); the
            // head still lands one cell before the destination.
            let (ux, uy) = dir.unit();
            DrawingCoord::new(to.x - ux, to.y - uy)
        }
    };
    canvas.set(pos, glyph);
}

fn place_axis_label(
    canvas: &mut Canvas,
    from: DrawingCoord,
    to: DrawingCoord,
    dir: Direction,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let width = display_width(text) as i32;
    match dir {
        Direction::Left | Direction::Right => {
            // Centered over the midpoint, one row above the run.
            let mid_x = (from.x + to.x) / 2;
            canvas.draw_text(DrawingCoord::new(mid_x - width / 2, from.y - 1), text);
        }
        _ => {
            // Beside the run at its midpoint row.
            let mid_y = (from.y + to.y) / 2;
            canvas.draw_text(DrawingCoord::new(from.x + 2, mid_y), text);
        }
    }
}

fn place_bent_label(
    canvas: &mut Canvas,
    from: DrawingCoord,
    corner: DrawingCoord,
    diff_x: i32,
    diff_y: i32,
    sy: i32,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    let width = display_width(text) as i32;
    let slack = (diff_y - diff_x).abs();

    if diff_y > diff_x {
        // Vertical straight leg along from.x; the label sits to its right.
        if slack > width + 2 {
            let mid_y = (from.y + corner.y) / 2;
            canvas.draw_text(DrawingCoord::new(from.x + 2, mid_y), text);
        } else {
            canvas.draw_text(DrawingCoord::new(corner.x + 2, corner.y), text);
        }
    } else {
        // Horizontal straight leg along from.y; the label sits on the side
        // the diagonal leg does not continue onto.
        let label_y = if sy > 0 { from.y - 1 } else { from.y + 1 };
        let center_x = if slack > width + 2 {
            (from.x + corner.x) / 2
        } else {
            corner.x
        };
        canvas.draw_text(DrawingCoord::new(center_x - width / 2, label_y), text);
    }
}
