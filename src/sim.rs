//! Headless simulation helpers for the `puyo-sim` binary.

use anyhow::{anyhow, Result};

use crate::core::SimpleRng;
use crate::engine::SessionConfig;
use crate::types::{Key, KeyMask};

/// Ticks each scripted key is held, then released for the same count
const HOLD_TICKS: u64 = 4;

pub const USAGE: &str = "usage: puyo-sim [--seed N] [--ticks N] [--colors N] [--log PATH]";

/// Apply command line overrides on top of `base`.
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_sim_args(args: &[String], base: SessionConfig) -> Result<Option<SessionConfig>> {
    let mut config = base;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --seed"))?;
                config.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("sim: invalid --seed value: {}", v))?;
            }
            "--ticks" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --ticks"))?;
                config.max_ticks = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("sim: invalid --ticks value: {}", v))?;
            }
            "--colors" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --colors"))?;
                config.color_count = v
                    .parse::<u8>()
                    .map_err(|_| anyhow!("sim: invalid --colors value: {}", v))?;
            }
            "--log" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("sim: missing value for --log"))?;
                config.log_path = Some(v.clone());
            }
            "-h" | "--help" => return Ok(None),
            other => {
                return Err(anyhow!("sim: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Some(config.normalized()))
}

/// Seed-derived key presses.
///
/// Time is cut into segments of `2 * HOLD_TICKS`; in each one a random key
/// (or nothing) is held for the first half and released for the second, so
/// every key produces clean trigger and release edges.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    rng: SimpleRng,
    segment: Option<u64>,
    key: Option<Key>,
}

impl ScriptedInput {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed ^ 0x9e37_79b9),
            segment: None,
            key: None,
        }
    }

    /// Keys held on `tick`. Ticks must be queried in increasing order.
    pub fn held(&mut self, tick: u64) -> KeyMask {
        let segment = tick / (2 * HOLD_TICKS);
        if self.segment != Some(segment) {
            self.segment = Some(segment);
            // One extra slot for "no key".
            let pick = self.rng.next_range(Key::ALL.len() as u32 + 1) as usize;
            self.key = Key::ALL.get(pick).copied();
        }

        match self.key {
            Some(key) if tick % (2 * HOLD_TICKS) < HOLD_TICKS => KeyMask::from_keys(&[key]),
            _ => KeyMask::EMPTY,
        }
    }
}
