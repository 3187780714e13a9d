//! RNG module - deterministic next-pair generation
//!
//! Pairs are drawn uniformly from the first `color_count` colors with a
//! small LCG, so the same seed always deals the same sequence. The queue
//! keeps [`NEXT_QUEUE_LEN`] pairs of lookahead for the preview.

use crate::types::{Color, NEXT_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }
}

/// Where the orchestrator gets its pairs from, as `(axis, child)` colors
pub trait PairSource {
    /// Reset the sequence and refill the lookahead
    fn initialize(&mut self);

    /// Take the front pair and deal a new one at the back
    fn take_next(&mut self) -> (Color, Color);

    /// Visit the upcoming pairs front to back, without consuming them
    fn peek(&self, visitor: impl FnMut(usize, (Color, Color)));
}

/// Seeded pair queue over the first `color_count` colors
#[derive(Debug, Clone)]
pub struct NextQueue {
    rng: SimpleRng,
    seed: u32,
    color_count: u8,
    pairs: [(Color, Color); NEXT_QUEUE_LEN],
}

impl NextQueue {
    /// Create a new queue. `color_count` is clamped to 1..=6.
    pub fn new(seed: u32, color_count: u8) -> Self {
        let mut queue = Self {
            rng: SimpleRng::new(seed),
            seed,
            color_count: color_count.clamp(1, Color::ALL.len() as u8),
            pairs: [(Color::Green, Color::Green); NEXT_QUEUE_LEN],
        };
        queue.initialize();
        queue
    }

    fn deal(&mut self) -> (Color, Color) {
        let axis = self.random_color();
        let child = self.random_color();
        (axis, child)
    }

    fn random_color(&mut self) -> Color {
        let i = self.rng.next_range(self.color_count as u32) as usize;
        Color::ALL[i]
    }

    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Upcoming pairs, front first
    pub fn pairs(&self) -> [(Color, Color); NEXT_QUEUE_LEN] {
        self.pairs
    }
}

impl PairSource for NextQueue {
    fn initialize(&mut self) {
        self.rng = SimpleRng::new(self.seed);
        for i in 0..NEXT_QUEUE_LEN {
            self.pairs[i] = self.deal();
        }
    }

    fn take_next(&mut self) -> (Color, Color) {
        let front = self.pairs[0];
        self.pairs.rotate_left(1);
        self.pairs[NEXT_QUEUE_LEN - 1] = self.deal();
        front
    }

    fn peek(&self, mut visitor: impl FnMut(usize, (Color, Color))) {
        for (i, &pair) in self.pairs.iter().enumerate() {
            visitor(i, pair);
        }
    }
}

impl Default for NextQueue {
    fn default() -> Self {
        Self::new(1, crate::types::DEFAULT_COLOR_COUNT)
    }
}
