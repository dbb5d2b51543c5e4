//! Coordinate types and compass-direction classification
//!
//! Two coordinate spaces exist: grid coordinates (logical column/row of a
//! node) and drawing coordinates (cell indices into a canvas). Both are
//! plain integer pairs; keeping them as distinct types prevents mixing.

use std::fmt;

/// Logical layout position of a node: column = depth level, row = slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Cell index into a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawingCoord {
    pub x: i32,
    pub y: i32,
}

impl DrawingCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for DrawingCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Compass-direction classification of two points' relative position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    Middle,
}

impl Direction {
    /// Point-symmetric pairing: `Up <-> Down`, `UpperLeft <-> LowerRight`, etc.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpperLeft => Direction::LowerRight,
            Direction::UpperRight => Direction::LowerLeft,
            Direction::LowerLeft => Direction::UpperRight,
            Direction::LowerRight => Direction::UpperLeft,
            Direction::Middle => Direction::Middle,
        }
    }

    /// Unit step in drawing space for this direction. Middle steps nowhere.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpperLeft => (-1, -1),
            Direction::UpperRight => (1, -1),
            Direction::LowerLeft => (-1, 1),
            Direction::LowerRight => (1, 1),
            Direction::Middle => (0, 0),
        }
    }

    pub fn is_axis_aligned(self) -> bool {
        matches!(
            self,
            Direction::Up | Direction::Down | Direction::Left | Direction::Right
        )
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpperLeft
                | Direction::UpperRight
                | Direction::LowerLeft
                | Direction::LowerRight
        )
    }

    /// Vertical component of a direction, used for diagonal arrowheads.
    pub fn vertical_component(self) -> Option<Direction> {
        match self {
            Direction::Up | Direction::UpperLeft | Direction::UpperRight => Some(Direction::Up),
            Direction::Down | Direction::LowerLeft | Direction::LowerRight => {
                Some(Direction::Down)
            }
            _ => None,
        }
    }
}

/// Classify the direction from one point to another.
///
/// Compares x first, then y: equal x yields Up/Down, equal y yields
/// Left/Right, anything else one of the four corner directions. Identical
/// points classify as Middle.
pub fn classify(from: DrawingCoord, to: DrawingCoord) -> Direction {
    if from.x == to.x {
        if from.y == to.y {
            Direction::Middle
        } else if to.y > from.y {
            Direction::Down
        } else {
            Direction::Up
        }
    } else if from.y == to.y {
        if to.x > from.x {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if to.x > from.x {
        if to.y > from.y {
            Direction::LowerRight
        } else {
            Direction::UpperRight
        }
    } else if to.y > from.y {
        Direction::LowerLeft
    } else {
        Direction::UpperLeft
    }
}

/// Classify grid coordinates; identical semantics to the drawing-space form.
pub fn classify_grid(from: GridCoord, to: GridCoord) -> Direction {
    classify(
        DrawingCoord::new(from.x, from.y),
        DrawingCoord::new(to.x, to.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_axis() {
        let origin = DrawingCoord::new(5, 5);
        assert_eq!(classify(origin, DrawingCoord::new(5, 9)), Direction::Down);
        assert_eq!(classify(origin, DrawingCoord::new(5, 1)), Direction::Up);
        assert_eq!(classify(origin, DrawingCoord::new(9, 5)), Direction::Right);
        assert_eq!(classify(origin, DrawingCoord::new(1, 5)), Direction::Left);
    }

    #[test]
    fn test_classify_corners() {
        let origin = DrawingCoord::new(5, 5);
        assert_eq!(
            classify(origin, DrawingCoord::new(9, 9)),
            Direction::LowerRight
        );
        assert_eq!(
            classify(origin, DrawingCoord::new(1, 9)),
            Direction::LowerLeft
        );
        assert_eq!(
            classify(origin, DrawingCoord::new(9, 1)),
            Direction::UpperRight
        );
        assert_eq!(
            classify(origin, DrawingCoord::new(1, 1)),
            Direction::UpperLeft
        );
    }

    #[test]
    fn test_classify_middle() {
        let p = DrawingCoord::new(3, 7);
        assert_eq!(classify(p, p), Direction::Middle);
    }

    #[test]
    fn test_opposite_is_involution() {
        let all = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::UpperLeft,
            Direction::UpperRight,
            Direction::LowerLeft,
            Direction::LowerRight,
            Direction::Middle,
        ];
        for dir in all {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    proptest! {
        #[test]
        fn prop_classify_antisymmetric(
            ax in -100i32..100, ay in -100i32..100,
            bx in -100i32..100, by in -100i32..100,
        ) {
            let a = DrawingCoord::new(ax, ay);
            let b = DrawingCoord::new(bx, by);
            prop_assert_eq!(classify(b, a), classify(a, b).opposite());
        }
    }
}
