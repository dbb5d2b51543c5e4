//! Growable character canvas shared by all drawing code
//!
//! A canvas is a dense 2D grid of single-glyph cells, default blank. It
//! only ever grows during a render; writes outside the current bounds
//! enlarge it in place. Composition uses transparent merges: blank cells
//! of an overlay never clobber the base.

use super::config::EdgeChars;
use super::geom::{classify, Direction, DrawingCoord};

/// The mutable 2D character buffer composed during a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    grid: Vec<Vec<char>>,
}

impl Canvas {
    /// Create a blank canvas sized `(w + 1) x (h + 1)`.
    ///
    /// The `+ 1` keeps coordinate `(w, h)` itself addressable, matching
    /// how box extents are computed by the layout engine.
    pub fn new(w: usize, h: usize) -> Self {
        let width = w + 1;
        let height = h + 1;
        Self {
            width,
            height,
            grid: vec![vec![' '; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Enlarge the canvas so that `(x, y)` is addressable, preserving content.
    pub fn grow_to(&mut self, x: usize, y: usize) {
        if x >= self.width {
            for row in &mut self.grid {
                row.resize(x + 1, ' ');
            }
            self.width = x + 1;
        }
        if y >= self.height {
            self.grid
                .extend((self.height..=y).map(|_| vec![' '; self.width]));
            self.height = y + 1;
        }
    }

    /// Set a single cell, growing the canvas as needed.
    ///
    /// Negative coordinates are outside the drawable area and are ignored;
    /// they arise only from label offsets clipped at the canvas edge.
    pub fn set(&mut self, coord: DrawingCoord, c: char) {
        if coord.x < 0 || coord.y < 0 {
            return;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        self.grow_to(x, y);
        self.grid[y][x] = c;
    }

    /// Get a cell; out-of-bounds reads are blank.
    pub fn get(&self, coord: DrawingCoord) -> char {
        if coord.x < 0 || coord.y < 0 {
            return ' ';
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        if y < self.height && x < self.width {
            self.grid[y][x]
        } else {
            ' '
        }
    }

    /// Merge `overlay` onto `base` at `offset`, producing a new canvas
    /// sized to the union bounding box.
    ///
    /// Base cells are copied first; overlay cells are copied only where
    /// non-blank, so the overlay is transparent.
    pub fn merge(base: &Canvas, overlay: &Canvas, offset: DrawingCoord) -> Canvas {
        let off_x = offset.x.max(0) as usize;
        let off_y = offset.y.max(0) as usize;
        let width = base.width.max(off_x + overlay.width);
        let height = base.height.max(off_y + overlay.height);

        let mut merged = Canvas::new(width.saturating_sub(1), height.saturating_sub(1));
        for (y, row) in base.grid.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                merged.grid[y][x] = c;
            }
        }
        for (y, row) in overlay.grid.iter().enumerate() {
            for (x, &c) in row.iter().enumerate() {
                if c != ' ' {
                    merged.grid[off_y + y][off_x + x] = c;
                }
            }
        }
        merged
    }

    /// Write text one glyph per column on a single row, growing as needed.
    pub fn draw_text(&mut self, start: DrawingCoord, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set(DrawingCoord::new(start.x + i as i32, start.y), c);
        }
    }

    /// Paint a straight run of line glyphs between two points.
    ///
    /// The direction between `from` and `to` must be axis-aligned or a
    /// pure diagonal; callers guarantee this. `offset_from` shrinks the
    /// run at the source end and `offset_to` extends (positive) or
    /// shrinks (negative) it at the destination end, both measured along
    /// the travel direction. Returns the painted coordinates in source to
    /// destination order; the run may be empty if the offsets consume it.
    pub fn draw_line(
        &mut self,
        from: DrawingCoord,
        to: DrawingCoord,
        offset_from: i32,
        offset_to: i32,
        chars: &EdgeChars,
    ) -> Vec<DrawingCoord> {
        let dir = classify(from, to);
        let (ux, uy) = dir.unit();
        if (ux, uy) == (0, 0) {
            return Vec::new();
        }

        let glyph = match dir {
            Direction::Up | Direction::Down => chars.vertical,
            Direction::Left | Direction::Right => chars.horizontal,
            Direction::UpperRight | Direction::LowerLeft => chars.diag_up,
            Direction::UpperLeft | Direction::LowerRight => chars.diag_down,
            Direction::Middle => return Vec::new(),
        };

        let start = DrawingCoord::new(from.x + ux * offset_from, from.y + uy * offset_from);
        let end = DrawingCoord::new(to.x + ux * offset_to, to.y + uy * offset_to);

        // Number of unit steps from start to end along the travel axis.
        let steps = if ux != 0 {
            (end.x - start.x) * ux
        } else {
            (end.y - start.y) * uy
        };
        if steps < 0 {
            return Vec::new();
        }

        let mut drawn = Vec::with_capacity(steps as usize + 1);
        let mut cursor = start;
        for _ in 0..=steps {
            self.set(cursor, glyph);
            drawn.push(cursor);
            cursor = DrawingCoord::new(cursor.x + ux, cursor.y + uy);
        }
        drawn
    }

    /// Serialize the canvas: rows top to bottom joined by newlines, no
    /// trailing newline. Trailing blank space is trimmed per row and
    /// trailing blank rows are dropped.
    pub fn serialize(&self) -> String {
        let mut rows: Vec<String> = self
            .grid
            .iter()
            .map(|row| {
                let s: String = row.iter().collect();
                s.trim_end().to_string()
            })
            .collect();

        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        rows.join("\n")
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.serialize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_canvas_dimensions() {
        let canvas = Canvas::new(10, 5);
        assert_eq!(canvas.width(), 11);
        assert_eq!(canvas.height(), 6);
    }

    #[test]
    fn test_set_and_get() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set(DrawingCoord::new(5, 3), 'X');
        assert_eq!(canvas.get(DrawingCoord::new(5, 3)), 'X');
        assert_eq!(canvas.get(DrawingCoord::new(0, 0)), ' ');
        assert_eq!(canvas.get(DrawingCoord::new(-1, 0)), ' ');
    }

    #[test]
    fn test_grow_on_write() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(DrawingCoord::new(10, 8), 'X');
        assert!(canvas.width() >= 11);
        assert!(canvas.height() >= 9);
        assert_eq!(canvas.get(DrawingCoord::new(10, 8)), 'X');
        // Previously written content survives growth
        canvas.set(DrawingCoord::new(1, 1), 'Y');
        canvas.set(DrawingCoord::new(30, 1), 'Z');
        assert_eq!(canvas.get(DrawingCoord::new(1, 1)), 'Y');
    }

    #[test]
    fn test_draw_text() {
        let mut canvas = Canvas::new(20, 3);
        canvas.draw_text(DrawingCoord::new(2, 1), "hello");
        assert_eq!(canvas.get(DrawingCoord::new(2, 1)), 'h');
        assert_eq!(canvas.get(DrawingCoord::new(6, 1)), 'o');
    }

    #[test]
    fn test_merge_transparency() {
        let mut base = Canvas::new(10, 4);
        base.draw_text(DrawingCoord::new(0, 0), "aaaa");
        let mut overlay = Canvas::new(3, 0);
        overlay.set(DrawingCoord::new(0, 0), 'b');
        // cells 1..3 of the overlay stay blank

        let merged = Canvas::merge(&base, &overlay, DrawingCoord::new(1, 0));
        assert_eq!(merged.get(DrawingCoord::new(0, 0)), 'a');
        assert_eq!(merged.get(DrawingCoord::new(1, 0)), 'b');
        // Blank overlay cell did not clobber the base
        assert_eq!(merged.get(DrawingCoord::new(2, 0)), 'a');
        assert_eq!(merged.get(DrawingCoord::new(3, 0)), 'a');
    }

    #[test]
    fn test_merge_grows_to_union() {
        let base = Canvas::new(3, 1);
        let overlay = Canvas::new(4, 2);
        let merged = Canvas::merge(&base, &overlay, DrawingCoord::new(2, 1));
        assert_eq!(merged.width(), 7);
        assert_eq!(merged.height(), 4);
    }

    #[test]
    fn test_draw_line_horizontal_offsets() {
        let chars = EdgeChars::ascii();
        let mut canvas = Canvas::new(12, 3);
        let drawn = canvas.draw_line(
            DrawingCoord::new(2, 1),
            DrawingCoord::new(8, 1),
            1,
            -1,
            &chars,
        );
        // Painted strictly between the endpoints
        assert_eq!(drawn.first(), Some(&DrawingCoord::new(3, 1)));
        assert_eq!(drawn.last(), Some(&DrawingCoord::new(7, 1)));
        assert_eq!(canvas.get(DrawingCoord::new(2, 1)), ' ');
        assert_eq!(canvas.get(DrawingCoord::new(5, 1)), '-');
        assert_eq!(canvas.get(DrawingCoord::new(8, 1)), ' ');
    }

    #[test]
    fn test_draw_line_vertical_paint_order() {
        let chars = EdgeChars::ascii();
        let mut canvas = Canvas::new(4, 10);
        let drawn = canvas.draw_line(
            DrawingCoord::new(2, 8),
            DrawingCoord::new(2, 2),
            1,
            -1,
            &chars,
        );
        // Upward line: painted from the source toward the destination
        assert_eq!(drawn.first(), Some(&DrawingCoord::new(2, 7)));
        assert_eq!(drawn.last(), Some(&DrawingCoord::new(2, 3)));
        assert_eq!(canvas.get(DrawingCoord::new(2, 5)), '|');
    }

    #[test]
    fn test_draw_line_diagonal() {
        let chars = EdgeChars::ascii();
        let mut canvas = Canvas::new(10, 10);
        let drawn = canvas.draw_line(
            DrawingCoord::new(1, 1),
            DrawingCoord::new(5, 5),
            0,
            0,
            &chars,
        );
        assert_eq!(drawn.len(), 5);
        for (i, coord) in drawn.iter().enumerate() {
            assert_eq!(*coord, DrawingCoord::new(1 + i as i32, 1 + i as i32));
        }
        assert_eq!(canvas.get(DrawingCoord::new(3, 3)), '\\');

        let drawn = canvas.draw_line(
            DrawingCoord::new(1, 9),
            DrawingCoord::new(4, 6),
            0,
            0,
            &chars,
        );
        assert_eq!(drawn.len(), 4);
        assert_eq!(canvas.get(DrawingCoord::new(2, 8)), '/');
    }

    #[test]
    fn test_draw_line_consumed_by_offsets() {
        let chars = EdgeChars::ascii();
        let mut canvas = Canvas::new(5, 5);
        let drawn = canvas.draw_line(
            DrawingCoord::new(1, 1),
            DrawingCoord::new(2, 1),
            1,
            -1,
            &chars,
        );
        assert!(drawn.is_empty());
    }

    #[test]
    fn test_serialize_no_trailing_newline() {
        let mut canvas = Canvas::new(5, 2);
        canvas.draw_text(DrawingCoord::new(0, 0), "ab");
        canvas.draw_text(DrawingCoord::new(0, 1), "cd");
        assert_eq!(canvas.serialize(), "ab\ncd");
    }

    #[test]
    fn test_serialize_trims_row_ends() {
        let mut canvas = Canvas::new(20, 2);
        canvas.draw_text(DrawingCoord::new(0, 0), "ab");
        assert_eq!(canvas.serialize(), "ab");
    }

    proptest! {
        #[test]
        fn prop_merge_preserves_overlay_and_base(
            base_cells in proptest::collection::vec((0usize..8, 0usize..8, proptest::char::range('a', 'z')), 0..12),
            overlay_cells in proptest::collection::vec((0usize..6, 0usize..6, proptest::char::range('A', 'Z')), 0..12),
            off_x in 0i32..5, off_y in 0i32..5,
        ) {
            let mut base = Canvas::new(8, 8);
            for &(x, y, c) in &base_cells {
                base.set(DrawingCoord::new(x as i32, y as i32), c);
            }
            let mut overlay = Canvas::new(6, 6);
            for &(x, y, c) in &overlay_cells {
                overlay.set(DrawingCoord::new(x as i32, y as i32), c);
            }

            let offset = DrawingCoord::new(off_x, off_y);
            let merged = Canvas::merge(&base, &overlay, offset);

            // Every non-blank overlay cell appears unchanged at offset + coord
            for y in 0..overlay.height() {
                for x in 0..overlay.width() {
                    let c = overlay.get(DrawingCoord::new(x as i32, y as i32));
                    if c != ' ' {
                        prop_assert_eq!(
                            merged.get(DrawingCoord::new(x as i32 + off_x, y as i32 + off_y)),
                            c
                        );
                    }
                }
            }
            // Every base cell not covered by a non-blank overlay cell is unchanged
            for y in 0..base.height() {
                for x in 0..base.width() {
                    let ox = x as i32 - off_x;
                    let oy = y as i32 - off_y;
                    let covered = ox >= 0
                        && oy >= 0
                        && overlay.get(DrawingCoord::new(ox, oy)) != ' ';
                    if !covered {
                        prop_assert_eq!(
                            merged.get(DrawingCoord::new(x as i32, y as i32)),
                            base.get(DrawingCoord::new(x as i32, y as i32))
                        );
                    }
                }
            }
        }
    }
}
