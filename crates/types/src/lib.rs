//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rule engine, orchestration, input mapping, logging).
//!
//! # Board Dimensions
//!
//! - **Width**: 6 columns (indexed 0-5, left to right)
//! - **Height**: 14 rows (indexed 0-13, row 0 is the floor)
//! - **Buffer row**: row 13 is only reachable by the child cell of a freshly
//!   spawned piece; settled cells there never fall
//! - **Spawn position**: axis at (2, 12), child above it at (2, 13)
//!
//! # Timing Constants
//!
//! Piece control and gravity are counted in ticks (one orchestrator call each):
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FALL_FRAMES_PER_CELL` | 5 | Chain gravity animation, ticks per cell |
//! | `TRANSLATE_TICKS` | 3 | Input lockout after a sideways move |
//! | `ROTATE_TICKS` | 3 | Input lockout after a rotation |
//! | `FALL_UNIT` | 120 | Fall accumulator value of one full cell |
//! | `FALL_SPEED` | 10 | Accumulator drain per tick |
//! | `FALL_SPEED_FAST` | 20 | Accumulator drain per tick while soft dropping |
//! | `GROUND_FRAMES` | 50 | Grounded ticks before a piece locks |
//! | `KEY_REPEAT_START_TICKS` | 12 | Held ticks before key repeat starts |
//! | `KEY_REPEAT_INTERVAL_TICKS` | 1 | Ticks between repeats afterwards |
//!
//! The erase animation is the exception: it runs on accumulated seconds.
//!
//! # Examples
//!
//! ```
//! use puyo_rules_types::{Color, Pos, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let color = Color::from_str("red").unwrap();
//! assert_eq!(color, Color::Red);
//! assert_eq!(Color::from_id(color.id()), Some(Color::Red));
//!
//! let rotation = Rotation::Up.rotate_cw();
//! assert_eq!(rotation, Rotation::Right);
//! assert_eq!(Pos::new(2, 12).offset(rotation.child_offset()), Pos::new(3, 12));
//!
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 14);
//! ```

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: u8 = 6;

/// Board height in cells (14 rows, the top one being the buffer row)
pub const BOARD_HEIGHT: u8 = 14;

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Ticks needed for a falling cell to cover one row during chain resolution
pub const FALL_FRAMES_PER_CELL: u32 = 5;

/// Input lockout after a successful translate
pub const TRANSLATE_TICKS: u32 = 3;

/// Input lockout after a successful rotation
pub const ROTATE_TICKS: u32 = 3;

/// Fall accumulator value representing one full cell
pub const FALL_UNIT: i32 = 120;

/// Fall accumulator drain per tick (normal gravity)
pub const FALL_SPEED: i32 = 10;

/// Fall accumulator drain per tick while the soft drop key is held
pub const FALL_SPEED_FAST: i32 = 20;

/// Grounded ticks a piece stays controllable before locking
pub const GROUND_FRAMES: u32 = 50;

/// Held ticks before a key starts repeating
pub const KEY_REPEAT_START_TICKS: u32 = 12;

/// Ticks between repeats once repeating
pub const KEY_REPEAT_INTERVAL_TICKS: u32 = 1;

/// Smallest connected group that gets erased
pub const MIN_GROUP_SIZE: usize = 4;

/// Flat bonus for erasing every cell on the board
pub const ALL_CLEAR_BONUS: u32 = 1800;

/// Number of upcoming pairs kept by the next queue
pub const NEXT_QUEUE_LEN: usize = 2;

/// Colors dealt by default (out of the six available)
pub const DEFAULT_COLOR_COUNT: u8 = 4;

/// Axis position of a freshly spawned piece
pub const SPAWN_POSITION: Pos = Pos::new(2, 12);


/// The six cell colors
///
/// Numeric ids 1-6 are used in snapshots and logs; 0 is reserved for an
/// empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Green,
    Red,
    Yellow,
    Blue,
    Purple,
    Cyan,
}

impl Color {
    /// All colors in id order
    pub const ALL: [Color; 6] = [
        Color::Green,
        Color::Red,
        Color::Yellow,
        Color::Blue,
        Color::Purple,
        Color::Cyan,
    ];

    /// Numeric id (1-6)
    pub fn id(&self) -> u8 {
        match self {
            Color::Green => 1,
            Color::Red => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Purple => 5,
            Color::Cyan => 6,
        }
    }

    /// Color for a numeric id, `None` for 0 or anything above 6
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=6 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_rules_types::Color;
    ///
    /// assert_eq!(Color::from_str("GREEN"), Some(Color::Green));
    /// assert_eq!(Color::from_str("p"), Some(Color::Purple));
    /// assert_eq!(Color::from_str("black"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" | "g" => Some(Color::Green),
            "red" | "r" => Some(Color::Red),
            "yellow" | "y" => Some(Color::Yellow),
            "blue" | "b" => Some(Color::Blue),
            "purple" | "p" => Some(Color::Purple),
            "cyan" | "c" => Some(Color::Cyan),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
        }
    }
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell holding a settled cell of that color
pub type Cell = Option<Color>;

/// Board coordinate: `x` is the column, `y` the row counted up from the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Shift by `(dx, dy)`
    pub const fn offset(self, d: (i8, i8)) -> Self {
        Self {
            x: self.x + d.0,
            y: self.y + d.1,
        }
    }

    pub const fn up(self) -> Self {
        self.offset((0, 1))
    }

    pub const fn down(self) -> Self {
        self.offset((0, -1))
    }

    pub const fn left(self) -> Self {
        self.offset((-1, 0))
    }

    pub const fn right(self) -> Self {
        self.offset((1, 0))
    }

    /// Whether the coordinate lies on the board
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }
}

/// Orientation of a piece: the side of the axis the child cell sits on
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use puyo_rules_types::Rotation;
    ///
    /// assert_eq!(Rotation::Up.rotate_cw(), Rotation::Right);
    /// assert_eq!(Rotation::Right.rotate_cw(), Rotation::Down);
    /// assert_eq!(Rotation::Down.rotate_cw(), Rotation::Left);
    /// assert_eq!(Rotation::Left.rotate_cw(), Rotation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Up => Rotation::Right,
            Rotation::Right => Rotation::Down,
            Rotation::Down => Rotation::Left,
            Rotation::Left => Rotation::Up,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::Up => Rotation::Left,
            Rotation::Left => Rotation::Down,
            Rotation::Down => Rotation::Right,
            Rotation::Right => Rotation::Up,
        }
    }

    /// Offset of the child cell relative to the axis
    pub fn child_offset(&self) -> (i8, i8) {
        match self {
            Rotation::Up => (0, 1),
            Rotation::Right => (1, 0),
            Rotation::Down => (0, -1),
            Rotation::Left => (-1, 0),
        }
    }

    /// Quarter turns clockwise from `Up` (0-3)
    pub fn index(&self) -> u8 {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 1,
            Rotation::Down => 2,
            Rotation::Left => 3,
        }
    }

    /// Angle in radians, clockwise from `Up`
    pub fn angle(&self) -> f32 {
        std::f32::consts::FRAC_PI_2 * self.index() as f32
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Up => "up",
            Rotation::Right => "right",
            Rotation::Down => "down",
            Rotation::Left => "left",
        }
    }
}

/// Horizontal direction for translating, or turning direction for rotating
/// (`Right` is clockwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Horizontal step for this direction
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Logical input keys read by the piece controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Move right (repeat-triggered)
    Right,
    /// Move left (repeat-triggered)
    Left,
    /// Rotate clockwise (edge-triggered)
    RotateRight,
    /// Rotate counter-clockwise (edge-triggered)
    RotateLeft,
    /// Drop to the bottom and lock (fires on release)
    QuickDrop,
    /// Fall faster while held
    SoftDrop,
}

impl Key {
    pub const ALL: [Key; 6] = [
        Key::Right,
        Key::Left,
        Key::RotateRight,
        Key::RotateLeft,
        Key::QuickDrop,
        Key::SoftDrop,
    ];

    /// Bit position in a [`KeyMask`]
    pub fn index(&self) -> usize {
        match self {
            Key::Right => 0,
            Key::Left => 1,
            Key::RotateRight => 2,
            Key::RotateLeft => 3,
            Key::QuickDrop => 4,
            Key::SoftDrop => 5,
        }
    }

    pub fn bit(&self) -> u8 {
        1 << self.index()
    }
}

/// Set of keys held during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyMask(u8);

impl KeyMask {
    pub const EMPTY: KeyMask = KeyMask(0);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11_1111)
    }

    pub fn from_keys(keys: &[Key]) -> Self {
        keys.iter().fold(Self::EMPTY, |mask, &k| mask.with(k))
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn with(self, key: Key) -> Self {
        Self(self.0 | key.bit())
    }

    pub fn without(self, key: Key) -> Self {
        Self(self.0 & !key.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Per-tick input queries consumed by the piece controller
///
/// Implemented by the edge tracker in the input crate; tests can provide
/// their own.
pub trait InputState {
    /// Key is held this tick
    fn is_raw(&self, key: Key) -> bool;
    /// Key went down this tick
    fn is_trigger(&self, key: Key) -> bool;
    /// Key went up this tick
    fn is_release(&self, key: Key) -> bool;
    /// Key fired its repeat pulse this tick (includes the initial press)
    fn is_repeat(&self, key: Key) -> bool;
}

/// Whether a group search should accumulate score
///
/// `Suppressed` is used when resolving a board that was set up rather than
/// played into (initial positions), so no points are awarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoringMode {
    /// Score with the given chain index (the first chain of a lock is 1)
    Enabled(u32),
    Suppressed,
}

/// Lifecycle event for a visual counterpart of a settled cell
///
/// The board only tracks logical cells; a presentation layer drains these
/// to create, move and destroy whatever it draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    /// A cell was written by `settle`
    Created { pos: Pos, color: Color },
    /// A floating cell was relocated by the fall plan
    Moved { from: Pos, to: Pos },
    /// An erased cell was cleared
    Destroyed { pos: Pos },
    /// Every cell was wiped by `clear`
    Cleared,
}
