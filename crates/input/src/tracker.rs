//! Edge and repeat tracking over per-tick key snapshots.
//!
//! The tracker is fed the set of held keys once per tick and derives the
//! four signals the piece controller reads. Repeat fires on the press tick,
//! then again after [`KEY_REPEAT_START_TICKS`] held ticks, then every
//! [`KEY_REPEAT_INTERVAL_TICKS`].

use crate::types::{
    InputState, Key, KeyMask, KEY_REPEAT_INTERVAL_TICKS, KEY_REPEAT_START_TICKS,
};

/// Tracks held keys across ticks.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    raw: KeyMask,
    trigger: KeyMask,
    release: KeyMask,
    repeat: KeyMask,
    wait: [u32; Key::ALL.len()],
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's held keys.
    pub fn update(&mut self, held: KeyMask) {
        let changed = held.bits() ^ self.raw.bits();
        self.trigger = KeyMask::from_bits(changed & held.bits());
        self.release = KeyMask::from_bits(changed & self.raw.bits());
        self.raw = held;

        self.repeat = KeyMask::EMPTY;
        for key in Key::ALL {
            let wait = &mut self.wait[key.index()];
            if self.trigger.contains(key) {
                self.repeat = self.repeat.with(key);
                *wait = KEY_REPEAT_START_TICKS;
            } else if self.raw.contains(key) {
                *wait = wait.saturating_sub(1);
                if *wait == 0 {
                    self.repeat = self.repeat.with(key);
                    *wait = KEY_REPEAT_INTERVAL_TICKS;
                }
            }
        }
    }

    /// Forget all held keys and pending repeats.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn raw(&self) -> KeyMask {
        self.raw
    }

    pub fn trigger(&self) -> KeyMask {
        self.trigger
    }

    pub fn release(&self) -> KeyMask {
        self.release
    }

    pub fn repeat(&self) -> KeyMask {
        self.repeat
    }
}

impl InputState for InputTracker {
    fn is_raw(&self, key: Key) -> bool {
        self.raw.contains(key)
    }

    fn is_trigger(&self, key: Key) -> bool {
        self.trigger.contains(key)
    }

    fn is_release(&self, key: Key) -> bool {
        self.release.contains(key)
    }

    fn is_repeat(&self, key: Key) -> bool {
        self.repeat.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> KeyMask {
        KeyMask::from_keys(keys)
    }

    #[test]
    fn test_trigger_and_release_edges() {
        let mut input = InputTracker::new();

        input.update(held(&[Key::Left]));
        assert!(input.is_trigger(Key::Left));
        assert!(input.is_raw(Key::Left));
        assert!(!input.is_release(Key::Left));

        input.update(held(&[Key::Left]));
        assert!(!input.is_trigger(Key::Left));
        assert!(input.is_raw(Key::Left));

        input.update(KeyMask::EMPTY);
        assert!(input.is_release(Key::Left));
        assert!(!input.is_raw(Key::Left));

        input.update(KeyMask::EMPTY);
        assert!(!input.is_release(Key::Left));
    }

    #[test]
    fn test_repeat_schedule() {
        let mut input = InputTracker::new();
        let mut fired = Vec::new();
        for tick in 0..16 {
            input.update(held(&[Key::Right]));
            if input.is_repeat(Key::Right) {
                fired.push(tick);
            }
        }
        assert_eq!(fired, vec![0, 12, 13, 14, 15]);
    }

    #[test]
    fn test_repeat_restarts_after_release() {
        let mut input = InputTracker::new();
        for _ in 0..20 {
            input.update(held(&[Key::Right]));
        }
        input.update(KeyMask::EMPTY);
        assert!(!input.is_repeat(Key::Right));

        input.update(held(&[Key::Right]));
        assert!(input.is_repeat(Key::Right));
        input.update(held(&[Key::Right]));
        assert!(!input.is_repeat(Key::Right));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut input = InputTracker::new();
        input.update(held(&[Key::Left]));
        input.update(held(&[Key::Left, Key::RotateRight]));
        assert!(input.is_trigger(Key::RotateRight));
        assert!(!input.is_trigger(Key::Left));
        assert!(!input.is_repeat(Key::Left));
    }

    #[test]
    fn test_clear_forgets_everything() {
        let mut input = InputTracker::new();
        input.update(held(&[Key::QuickDrop]));
        input.clear();
        assert!(input.raw().is_empty());
        assert!(input.trigger().is_empty());

        // A key still held after a clear counts as a fresh press.
        input.update(held(&[Key::QuickDrop]));
        assert!(input.is_trigger(Key::QuickDrop));
    }
}
