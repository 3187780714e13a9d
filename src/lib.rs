//! Puyo rules (workspace facade crate).
//!
//! This package exposes `puyo_rules::{core,engine,input,types}` while the
//! implementation lives in dedicated crates under `crates/`. The [`sim`]
//! module backs the `puyo-sim` binary.

pub use puyo_rules_core as core;
pub use puyo_rules_engine as engine;
pub use puyo_rules_input as input;
pub use puyo_rules_types as types;

pub mod sim;
