//! Engine module - reference game loop on top of the core rules
//!
//! [`Session`] drives one board through spawn, control and chain
//! resolution, one fixed tick at a time. [`SessionConfig`] reads the
//! tunables from the environment and [`EventLog`] records the game as
//! JSON lines.

pub mod config;
pub mod log;
pub mod session;

pub use puyo_rules_core as core;
pub use puyo_rules_input as input;
pub use puyo_rules_types as types;

pub use config::SessionConfig;
pub use log::{EventLog, LogRecord};
pub use session::{Phase, Session};
