//! Input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! codes onto the logical [`crate::types::Key`] set and turns per-tick held
//! key snapshots into trigger, release and repeat signals for the piece
//! controller.

pub mod map;
pub mod tracker;

pub use puyo_rules_types as types;

pub use map::{held_keys, key_for};
pub use tracker::InputTracker;
