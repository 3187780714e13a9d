//! Piece module - the two-cell falling pair and its rotation kicks
//!
//! A piece is an axis cell plus a child cell on one of its four sides.
//! Rotation turns the child around the axis; before the new pose is
//! validated a single deterministic kick may shift the axis away from
//! whatever blocks the turn.

use crate::types::{Color, Direction, Pos, Rotation, SPAWN_POSITION};

/// The controlled pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub axis_color: Color,
    pub child_color: Color,
    pub axis: Pos,
    pub rotation: Rotation,
}

impl Piece {
    /// Create a new piece at the spawn position, child on top
    pub fn new(axis_color: Color, child_color: Color) -> Self {
        Self {
            axis_color,
            child_color,
            axis: SPAWN_POSITION,
            rotation: Rotation::Up,
        }
    }

    /// Position of the child cell
    pub fn child(&self) -> Pos {
        child_pos(self.axis, self.rotation)
    }

    /// Both cells with their colors, axis first
    pub fn cells(&self) -> [(Pos, Color); 2] {
        [
            (self.axis, self.axis_color),
            (self.child(), self.child_color),
        ]
    }
}

/// Position of the child cell for an axis and orientation
pub fn child_pos(axis: Pos, rotation: Rotation) -> Pos {
    axis.offset(rotation.child_offset())
}

/// Check both cells of a pose against `is_valid`
pub fn fits(axis: Pos, rotation: Rotation, is_valid: impl Fn(Pos) -> bool) -> bool {
    is_valid(axis) && is_valid(child_pos(axis, rotation))
}

/// Axis position after the kick for turning into `target`.
///
/// - Down: lift by one row unless both the cell below the axis and the
///   below-diagonal on the turning side are free.
/// - Right: shift left by one if the cell right of the axis is taken.
/// - Left: shift right by one if the cell left of the axis is taken.
/// - Up: never kicks.
pub fn kick(
    axis: Pos,
    target: Rotation,
    direction: Direction,
    is_valid: impl Fn(Pos) -> bool,
) -> Pos {
    match target {
        Rotation::Down => {
            let diagonal = axis.offset((direction.dx(), -1));
            if !is_valid(axis.down()) || !is_valid(diagonal) {
                axis.up()
            } else {
                axis
            }
        }
        Rotation::Right => {
            if !is_valid(axis.right()) {
                axis.left()
            } else {
                axis
            }
        }
        Rotation::Left => {
            if !is_valid(axis.left()) {
                axis.right()
            } else {
                axis
            }
        }
        Rotation::Up => axis,
    }
}

/// Try to rotate a pose one quarter turn.
///
/// Returns the kicked axis and new orientation if both resulting cells are
/// valid, `None` otherwise.
pub fn try_rotate(
    axis: Pos,
    rotation: Rotation,
    direction: Direction,
    is_valid: impl Fn(Pos) -> bool,
) -> Option<(Pos, Rotation)> {
    let target = match direction {
        Direction::Right => rotation.rotate_cw(),
        Direction::Left => rotation.rotate_ccw(),
    };

    let kicked = kick(axis, target, direction, &is_valid);
    if fits(kicked, target, &is_valid) {
        Some((kicked, target))
    } else {
        None
    }
}
