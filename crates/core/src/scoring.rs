//! Scoring module - chain, connection and color bonuses
//!
//! Every erase step scores `10 * erased * max(1, chain + connect + color)`.
//! All table lookups clamp the index to the last entry, so long chains,
//! oversized groups and many colors keep the maximum bonus.

use crate::types::ALL_CLEAR_BONUS;

/// Chain bonus by chain index (the first chain of a lock is index 1)
pub const CHAIN_BONUS: [u32; 19] = [
    0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

/// Connection bonus by group size (groups below 4 are never erased)
pub const CONNECT_BONUS: [u32; 11] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7];

/// Color bonus by number of distinct colors erased in one step
pub const COLOR_BONUS: [u32; 5] = [0, 3, 6, 12, 24];

/// Points per erased cell before bonuses
pub const POINTS_PER_CELL: u32 = 10;

/// Breakdown of one erase step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EraseScore {
    pub chain_bonus: u32,
    pub connect_bonus: u32,
    pub color_bonus: u32,
    /// `max(1, chain + connect + color)`
    pub multiplier: u32,
    pub all_clear: bool,
    pub total: u32,
}

fn clamped(table: &[u32], index: usize) -> u32 {
    table[index.min(table.len() - 1)]
}

pub fn chain_bonus(chain_index: u32) -> u32 {
    clamped(&CHAIN_BONUS, chain_index as usize)
}

pub fn connect_bonus(group_size: usize) -> u32 {
    clamped(&CONNECT_BONUS, group_size)
}

/// Color bonus from a bitset with one bit per distinct erased color
pub fn color_bonus(color_bits: u32) -> u32 {
    clamped(&COLOR_BONUS, color_bits.count_ones() as usize)
}

/// Score one erase step.
///
/// `connect_sum` is the sum of [`connect_bonus`] over every erased group.
pub fn calculate_erase_score(
    erased: usize,
    chain_index: u32,
    connect_sum: u32,
    color_bits: u32,
    all_clear: bool,
) -> EraseScore {
    let chain = chain_bonus(chain_index);
    let color = color_bonus(color_bits);
    let multiplier = chain.saturating_add(connect_sum).saturating_add(color).max(1);

    let mut total = POINTS_PER_CELL
        .saturating_mul(erased as u32)
        .saturating_mul(multiplier);
    if all_clear {
        total = total.saturating_add(ALL_CLEAR_BONUS);
    }

    EraseScore {
        chain_bonus: chain,
        connect_bonus: connect_sum,
        color_bonus: color,
        multiplier,
        all_clear,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_bonus_clamps() {
        assert_eq!(chain_bonus(0), 0);
        assert_eq!(chain_bonus(1), 8);
        assert_eq!(chain_bonus(4), 64);
        assert_eq!(chain_bonus(18), 512);
        assert_eq!(chain_bonus(40), 512);
    }

    #[test]
    fn test_connect_bonus_clamps() {
        assert_eq!(connect_bonus(4), 0);
        assert_eq!(connect_bonus(5), 2);
        assert_eq!(connect_bonus(10), 7);
        assert_eq!(connect_bonus(30), 7);
    }

    #[test]
    fn test_color_bonus_counts_bits() {
        assert_eq!(color_bonus(0), 0);
        assert_eq!(color_bonus(0b10), 3);
        assert_eq!(color_bonus(0b110), 6);
        assert_eq!(color_bonus(0b1111_110), 24);
    }

    #[test]
    fn test_multiplier_is_at_least_one() {
        let score = calculate_erase_score(4, 0, 0, 0b10, false);
        assert_eq!(score.multiplier, 3);

        let score = calculate_erase_score(4, 0, 0, 0, false);
        assert_eq!(score.multiplier, 1);
        assert_eq!(score.total, 40);
    }

    #[test]
    fn test_erase_score_formula() {
        // Second-chain style step: 6 cells in one group of one color, chain index 2.
        let score = calculate_erase_score(6, 2, connect_bonus(6), 1 << 1, false);
        assert_eq!(score.chain_bonus, 16);
        assert_eq!(score.connect_bonus, 3);
        assert_eq!(score.color_bonus, 3);
        assert_eq!(score.total, 10 * 6 * (16 + 3 + 3));
    }

    #[test]
    fn test_all_clear_adds_flat_bonus() {
        let plain = calculate_erase_score(4, 1, 0, 1, false);
        let cleared = calculate_erase_score(4, 1, 0, 1, true);
        assert_eq!(cleared.total, plain.total + ALL_CLEAR_BONUS);
    }
}
