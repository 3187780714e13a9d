//! Countdown timer for fixed-length pose transitions.
//!
//! A transition starts at `duration` and counts down once per tick; the
//! remaining fraction doubles as the interpolation weight of the previous pose.

/// Countdown-to-zero progress tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer {
    remaining: u32,
    duration: u32,
}

impl Timer {
    /// Start a transition lasting `duration` ticks.
    ///
    /// # Panics
    ///
    /// Panics if `duration` is zero.
    pub fn set(&mut self, duration: u32) {
        assert!(duration > 0, "timer duration must be positive");
        self.remaining = duration;
        self.duration = duration;
    }

    /// Advance one tick. Returns true while the transition is still running.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    /// Remaining share of the transition in [0, 1]; 1 right after `set`.
    pub fn fraction(&self) -> f32 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining as f32 / self.duration as f32
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_counts_down_to_zero() {
        let mut timer = Timer::default();
        timer.set(3);
        assert_eq!(timer.fraction(), 1.0);

        assert!(timer.tick());
        assert!((timer.fraction() - 2.0 / 3.0).abs() < 1e-6);
        assert!(timer.tick());
        assert!(!timer.tick());
        assert_eq!(timer.fraction(), 0.0);

        // Clamped at zero.
        assert!(!timer.tick());
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_single_tick_timer_expires_immediately() {
        let mut timer = Timer::default();
        timer.set(1);
        assert!(timer.is_running());
        assert!(!timer.tick());
    }

    #[test]
    fn test_idle_timer() {
        let mut timer = Timer::default();
        assert_eq!(timer.fraction(), 0.0);
        assert!(!timer.tick());
    }

    #[test]
    #[should_panic(expected = "timer duration must be positive")]
    fn test_zero_duration_panics() {
        let mut timer = Timer::default();
        timer.set(0);
    }
}
