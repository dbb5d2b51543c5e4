//! Edge-side selection
//!
//! Given two grid-positioned boxes and the active orientation, selects
//! which side of each box an edge should leave from and arrive at. The
//! result always carries a second candidate pair so a caller can switch
//! when the preferred choice collides with something; this module itself
//! performs no collision checks.

use crate::core::{classify_grid, Direction, Flow, GridCoord};

/// One exit/entry side combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidePair {
    pub exit: Direction,
    pub entry: Direction,
}

impl SidePair {
    pub fn new(exit: Direction, entry: Direction) -> Self {
        Self { exit, entry }
    }
}

/// The resolver's two candidates, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideChoice {
    pub preferred: SidePair,
    pub alternative: SidePair,
}

impl SideChoice {
    fn new(preferred: SidePair, alternative: SidePair) -> Self {
        Self {
            preferred,
            alternative,
        }
    }
}

/// Select exit and entry sides for an edge between two grid positions.
///
/// `self_loop` marks an edge whose source and destination are the same
/// node; its grid coordinates are then equal and unusable for
/// classification.
pub fn resolve_sides(from: GridCoord, to: GridCoord, flow: Flow, self_loop: bool) -> SideChoice {
    use Direction::*;

    if self_loop {
        return match flow {
            Flow::LeftRight => {
                SideChoice::new(SidePair::new(Right, Down), SidePair::new(Down, Right))
            }
            Flow::TopDown => {
                SideChoice::new(SidePair::new(Down, Right), SidePair::new(Right, Down))
            }
        };
    }

    let dir = classify_grid(from, to);

    // Each corner direction has a concrete pair per orientation: the
    // preferred pair leads with the flow's cross axis (vertical in LR,
    // horizontal in TD) to minimize visual crossings, the alternative
    // leads with the other axis.
    match dir {
        LowerRight => match flow {
            Flow::LeftRight => {
                SideChoice::new(SidePair::new(Down, Left), SidePair::new(Right, Up))
            }
            Flow::TopDown => SideChoice::new(SidePair::new(Right, Up), SidePair::new(Down, Left)),
        },
        UpperRight => match flow {
            Flow::LeftRight => {
                SideChoice::new(SidePair::new(Up, Left), SidePair::new(Right, Down))
            }
            Flow::TopDown => SideChoice::new(SidePair::new(Right, Down), SidePair::new(Up, Left)),
        },
        LowerLeft => match flow {
            Flow::LeftRight => {
                SideChoice::new(SidePair::new(Down, Down), SidePair::new(Left, Up))
            }
            Flow::TopDown => SideChoice::new(SidePair::new(Left, Up), SidePair::new(Down, Right)),
        },
        UpperLeft => match flow {
            Flow::LeftRight => {
                SideChoice::new(SidePair::new(Down, Down), SidePair::new(Left, Down))
            }
            Flow::TopDown => {
                SideChoice::new(SidePair::new(Right, Right), SidePair::new(Up, Right))
            }
        },
        _ => {
            let backwards = match flow {
                Flow::LeftRight => dir == Left,
                Flow::TopDown => dir == Up,
            };
            if backwards {
                // Send the line around the outside of the boxes instead of
                // straight through the nodes between them.
                match flow {
                    Flow::LeftRight => {
                        SideChoice::new(SidePair::new(Down, Down), SidePair::new(Left, Right))
                    }
                    Flow::TopDown => {
                        SideChoice::new(SidePair::new(Right, Right), SidePair::new(Up, Down))
                    }
                }
            } else {
                SideChoice::new(
                    SidePair::new(dir, dir.opposite()),
                    SidePair::new(dir, dir.opposite()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn test_forward_horizontal_lr() {
        let choice = resolve_sides(
            GridCoord::new(0, 0),
            GridCoord::new(1, 0),
            Flow::LeftRight,
            false,
        );
        assert_eq!(choice.preferred, SidePair::new(Right, Left));
    }

    #[test]
    fn test_forward_vertical_td() {
        let choice = resolve_sides(
            GridCoord::new(0, 0),
            GridCoord::new(0, 1),
            Flow::TopDown,
            false,
        );
        assert_eq!(choice.preferred, SidePair::new(Down, Up));
    }

    #[test]
    fn test_backward_lr_reroutes() {
        // Destination column behind the source: the naive (Left, Right)
        // pair would cut straight through the boxes between them.
        let choice = resolve_sides(
            GridCoord::new(2, 0),
            GridCoord::new(0, 0),
            Flow::LeftRight,
            false,
        );
        assert_eq!(choice.preferred, SidePair::new(Down, Down));
        assert_eq!(choice.alternative, SidePair::new(Left, Right));
    }

    #[test]
    fn test_backward_td_reroutes() {
        let choice = resolve_sides(
            GridCoord::new(0, 2),
            GridCoord::new(0, 0),
            Flow::TopDown,
            false,
        );
        assert_eq!(choice.preferred, SidePair::new(Right, Right));
        assert_eq!(choice.alternative, SidePair::new(Up, Down));
    }

    #[test]
    fn test_self_loop_pairs() {
        let at = GridCoord::new(1, 1);
        let lr = resolve_sides(at, at, Flow::LeftRight, true);
        assert_eq!(lr.preferred, SidePair::new(Right, Down));
        let td = resolve_sides(at, at, Flow::TopDown, true);
        assert_eq!(td.preferred, SidePair::new(Down, Right));
    }

    #[test]
    fn test_diagonal_prefers_cross_axis() {
        // LR prefers to leave vertically for diagonal targets
        let lr = resolve_sides(
            GridCoord::new(0, 0),
            GridCoord::new(1, 1),
            Flow::LeftRight,
            false,
        );
        assert_eq!(lr.preferred, SidePair::new(Down, Left));
        assert_eq!(lr.alternative, SidePair::new(Right, Up));

        // TD prefers to leave horizontally
        let td = resolve_sides(
            GridCoord::new(0, 0),
            GridCoord::new(1, 1),
            Flow::TopDown,
            false,
        );
        assert_eq!(td.preferred, SidePair::new(Right, Up));
    }

    #[test]
    fn test_upper_right_lr() {
        let choice = resolve_sides(
            GridCoord::new(0, 2),
            GridCoord::new(1, 0),
            Flow::LeftRight,
            false,
        );
        assert_eq!(choice.preferred, SidePair::new(Up, Left));
        assert_eq!(choice.alternative, SidePair::new(Right, Down));
    }

    #[test]
    fn test_backward_diagonals_route_outside() {
        let ul = resolve_sides(
            GridCoord::new(2, 2),
            GridCoord::new(0, 0),
            Flow::LeftRight,
            false,
        );
        assert_eq!(ul.preferred, SidePair::new(Down, Down));

        let ll = resolve_sides(
            GridCoord::new(2, 0),
            GridCoord::new(0, 2),
            Flow::LeftRight,
            false,
        );
        assert_eq!(ll.preferred, SidePair::new(Down, Down));
    }

    #[test]
    fn test_every_choice_uses_axis_sides() {
        // The resolver only ever hands out axis-aligned box sides.
        let coords = [-1, 0, 1];
        for &dx in &coords {
            for &dy in &coords {
                for flow in [Flow::LeftRight, Flow::TopDown] {
                    let choice = resolve_sides(
                        GridCoord::new(1, 1),
                        GridCoord::new(1 + dx, 1 + dy),
                        flow,
                        dx == 0 && dy == 0,
                    );
                    for pair in [choice.preferred, choice.alternative] {
                        assert!(pair.exit.is_axis_aligned(), "{:?}", pair);
                        assert!(pair.entry.is_axis_aligned(), "{:?}", pair);
                    }
                }
            }
        }
    }
}
