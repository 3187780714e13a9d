//! Piece controller - spawn, movement, gravity and locking of the active pair
//!
//! The controller owns the in-flight piece and only writes into the board
//! when the piece locks. Gravity is a fixed-point accumulator: it drains by
//! [`FALL_SPEED`] (or [`FALL_SPEED_FAST`]) every tick and each time it drops
//! below zero the piece tries to move one row down. A piece that cannot
//! move spends its [`GROUND_FRAMES`] budget before locking.

use crate::board::Board;
use crate::piece::{child_pos, fits, try_rotate, Piece};
use crate::timer::Timer;
use crate::types::{
    Color, Direction, InputState, Key, Pos, Rotation, FALL_SPEED, FALL_SPEED_FAST, FALL_UNIT,
    GROUND_FRAMES, ROTATE_TICKS, TRANSLATE_TICKS,
};

/// Interpolated drawing position of both cells, in cell units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPose {
    pub axis: (f32, f32),
    pub child: (f32, f32),
}

/// Controls the active pair
#[derive(Debug, Clone)]
pub struct PieceController {
    piece: Option<Piece>,
    /// Pose before the last translate/rotate, for interpolation
    last_axis: Pos,
    last_rotation: Rotation,
    transition: Timer,
    fall_count: i32,
    ground_frames: u32,
    score: u32,
}

impl PieceController {
    pub fn new() -> Self {
        Self {
            piece: None,
            last_axis: Pos::default(),
            last_rotation: Rotation::Up,
            transition: Timer::default(),
            fall_count: 0,
            ground_frames: GROUND_FRAMES,
            score: 0,
        }
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    pub fn is_active(&self) -> bool {
        self.piece.is_some()
    }

    /// Whether a translate/rotate transition is still blocking input
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_running()
    }

    pub fn fall_count(&self) -> i32 {
        self.fall_count
    }

    pub fn ground_frames(&self) -> u32 {
        self.ground_frames
    }

    /// Activate a new piece at the spawn position.
    ///
    /// Returns false and leaves everything untouched if either spawn cell is
    /// taken; that is the game-over condition.
    pub fn spawn(&mut self, board: &Board, axis_color: Color, child_color: Color) -> bool {
        let piece = Piece::new(axis_color, child_color);
        if !fits(piece.axis, piece.rotation, |p| board.occupy(p)) {
            return false;
        }

        self.piece = Some(piece);
        self.last_axis = piece.axis;
        self.last_rotation = piece.rotation;
        self.transition.set(1);
        self.fall_count = 0;
        self.ground_frames = GROUND_FRAMES;
        true
    }

    fn begin_transition(&mut self, from: Piece, to: Piece, ticks: u32) {
        self.last_axis = from.axis;
        self.last_rotation = from.rotation;
        self.piece = Some(to);
        self.transition.set(ticks);
    }

    /// Shift the piece one column.
    ///
    /// Input gating during the transition is done by [`PieceController::control`].
    pub fn translate(&mut self, board: &Board, direction: Direction) -> bool {
        let Some(piece) = self.piece else {
            return false;
        };

        let axis = piece.axis.offset((direction.dx(), 0));
        if !fits(axis, piece.rotation, |p| board.occupy(p)) {
            return false;
        }

        self.begin_transition(piece, Piece { axis, ..piece }, TRANSLATE_TICKS);
        true
    }

    /// Turn the piece a quarter turn (`Right` is clockwise), with kicks
    pub fn rotate(&mut self, board: &Board, direction: Direction) -> bool {
        let Some(piece) = self.piece else {
            return false;
        };

        let Some((axis, rotation)) =
            try_rotate(piece.axis, piece.rotation, direction, |p| board.occupy(p))
        else {
            return false;
        };

        self.begin_transition(piece, Piece { axis, rotation, ..piece }, ROTATE_TICKS);
        true
    }

    /// Drop straight to the lowest free row and lock immediately
    pub fn quick_drop(&mut self, board: &mut Board) {
        let Some(piece) = self.piece else {
            return;
        };

        let mut axis = piece.axis;
        while fits(axis.down(), piece.rotation, |p| board.occupy(p)) {
            axis = axis.down();
        }

        self.piece = Some(Piece { axis, ..piece });
        self.lock(board);
    }

    /// Apply one tick of gravity.
    ///
    /// Returns false once the piece has locked into the board (or if there
    /// was no piece).
    pub fn fall(&mut self, board: &mut Board, is_fast: bool) -> bool {
        if self.piece.is_none() {
            return false;
        }

        self.fall_count -= if is_fast { FALL_SPEED_FAST } else { FALL_SPEED };

        let mut advanced = false;
        while self.fall_count < 0 {
            let Some(piece) = self.piece else {
                return false;
            };

            let below = piece.axis.down();
            if !fits(below, piece.rotation, |p| board.occupy(p)) {
                self.fall_count = 0;
                self.ground_frames = self.ground_frames.saturating_sub(1);
                if self.ground_frames > 0 {
                    return true;
                }

                self.lock(board);
                return false;
            }

            self.piece = Some(Piece { axis: below, ..piece });
            self.last_axis = self.last_axis.down();
            self.fall_count += FALL_UNIT;
            advanced = true;
        }

        if is_fast && advanced {
            self.score += 1;
        }

        true
    }

    /// Write both cells into the board and deactivate the piece.
    ///
    /// # Panics
    ///
    /// Panics if either cell is already taken; a piece never overlaps
    /// settled cells.
    fn lock(&mut self, board: &mut Board) {
        let Some(piece) = self.piece.take() else {
            return;
        };

        let axis_set = board.settle(piece.axis, piece.axis_color);
        let child_set = board.settle(piece.child(), piece.child_color);
        assert!(
            axis_set && child_set,
            "locked piece overlaps settled cells at {:?}",
            piece
        );
    }

    /// One control step.
    ///
    /// Gravity runs first. While a translate/rotate transition is running
    /// movement input is ignored; otherwise the first successful action
    /// among repeat-right, repeat-left, rotate-right, rotate-left and
    /// quick-drop (on release) ends the step.
    ///
    /// Returns false once the piece has locked.
    pub fn control(&mut self, board: &mut Board, input: &impl InputState) -> bool {
        if !self.fall(board, input.is_raw(Key::SoftDrop)) {
            return false;
        }

        if self.transition.tick() {
            return true;
        }

        if input.is_repeat(Key::Right) && self.translate(board, Direction::Right) {
            return true;
        }
        if input.is_repeat(Key::Left) && self.translate(board, Direction::Left) {
            return true;
        }
        if input.is_trigger(Key::RotateRight) && self.rotate(board, Direction::Right) {
            return true;
        }
        if input.is_trigger(Key::RotateLeft) && self.rotate(board, Direction::Left) {
            return true;
        }
        if input.is_release(Key::QuickDrop) {
            self.quick_drop(board);
            return false;
        }

        true
    }

    /// Drawing position of the active pair, `None` when no piece is active.
    ///
    /// Position blends from the previous pose to the current one as the
    /// transition runs out; the child swings around the axis along the
    /// shorter arc. The sub-cell gravity offset lifts both cells.
    pub fn render_pose(&self) -> Option<RenderPose> {
        use std::f32::consts::PI;

        let piece = self.piece?;
        let rate = self.transition.fraction();
        let lift = self.fall_count as f32 / FALL_UNIT as f32;

        let lerp = |to: i8, from: i8| to as f32 + (from as f32 - to as f32) * rate;
        let ax = lerp(piece.axis.x, self.last_axis.x);
        let ay = lerp(piece.axis.y, self.last_axis.y) + lift;

        let theta0 = piece.rotation.angle();
        let theta1 = self.last_rotation.angle();
        let mut delta = theta1 - theta0;
        if delta > PI {
            delta -= 2.0 * PI;
        }
        if delta < -PI {
            delta += 2.0 * PI;
        }
        let theta = theta0 + rate * delta;

        Some(RenderPose {
            axis: (ax, ay),
            child: (ax + theta.sin(), ay + theta.cos()),
        })
    }

    /// Take the accumulated soft drop score, leaving zero behind
    pub fn pop_score(&mut self) -> u32 {
        std::mem::take(&mut self.score)
    }

    /// Both cells of the active piece
    pub fn cells(&self) -> Option<[(Pos, Color); 2]> {
        self.piece.map(|p| p.cells())
    }

    /// Where the child cell would be after the current pose settles
    pub fn child(&self) -> Option<Pos> {
        self.piece.map(|p| child_pos(p.axis, p.rotation))
    }
}

impl Default for PieceController {
    fn default() -> Self {
        Self::new()
    }
}
