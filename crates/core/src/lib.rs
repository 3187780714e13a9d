//! Core rules module - pure, deterministic, and testable
//!
//! This crate contains the chain-puzzle rules: the grid, gravity, group
//! erasure, scoring and the controlled pair. It has **zero dependencies** on
//! rendering, input devices or I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Testable**: Unit tests for every rule, plus integration tests at the root
//! - **Portable**: Can run headless, in a terminal or behind any renderer
//! - **Fast**: The chain-resolution hot path does not allocate
//!
//! # Module Structure
//!
//! - [`board`]: 6x14 grid, fall resolution, group search and erase animation
//! - [`controller`]: The active pair's gravity, movement, rotation and locking
//! - [`piece`]: Pair geometry and the rotation kick rules
//! - [`rng`]: Seeded next-pair queue
//! - [`scoring`]: Chain, connection and color bonus tables
//! - [`snapshot`]: Plain-data views for logging and tests
//! - [`timer`]: Countdown used to gate input during transitions
//!
//! # Game Rules
//!
//! - **Erasure**: Four or more same-colored cells connected horizontally or
//!   vertically are erased together
//! - **Chains**: Cells falling into the gaps can form new groups; each round
//!   is the next link of the chain and scores a higher bonus
//! - **Buffer row**: The top row only ever holds the child of a fresh pair and
//!   is ignored by gravity
//! - **Game over**: A new pair cannot be placed at the spawn position
//!
//! # Example
//!
//! ```
//! use puyo_rules_core::{Board, PieceController};
//! use puyo_rules_core::types::{Color, ScoringMode};
//!
//! let mut board = Board::new();
//! let mut controller = PieceController::new();
//!
//! // Drop a vertical red pair twice into the same column.
//! for _ in 0..2 {
//!     assert!(controller.spawn(&board, Color::Red, Color::Red));
//!     controller.quick_drop(&mut board);
//! }
//!
//! assert!(!board.resolve_fall_plan());
//! assert!(board.find_groups(ScoringMode::Enabled(1)));
//! assert_eq!(board.erase_set().len(), 4);
//! ```
//!
//! # Timing
//!
//! Two clocks are in play:
//! - **Ticks**: Piece gravity, input gating and the cell drop animation
//!   advance once per call
//! - **Seconds**: The erase animation runs on elapsed real time
//!   ([`Board::advance_erase`](board::Board::advance_erase))

pub mod board;
pub mod controller;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use puyo_rules_types as types;

// Re-export commonly used types for convenience
pub use board::{erase_scale_at, Board, FallDescriptor, FallingCell, EVENT_CAPACITY};
pub use controller::{PieceController, RenderPose};
pub use piece::{child_pos, kick, try_rotate, Piece};
pub use rng::{NextQueue, PairSource, SimpleRng};
pub use scoring::{calculate_erase_score, EraseScore};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use timer::Timer;
