//! Weekly time grid.
//!
//! The grid is a rectangle of days and slots, both 1-based: day 1 is
//! Monday, slot 1 is the first period of the day. Different deployments
//! run different grids (five or seven periods a day), so the dimensions
//! are data, never constants.
//!
//! A block of `b` contiguous slots may start only at slots aligned to
//! the block size (for `b = 2`: slots 1, 3, 5, ...), and must fit within
//! the day.

use serde::{Deserialize, Serialize};

/// A days x slots weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    days: u8,
    slots_per_day: u8,
}

impl TimeGrid {
    /// Creates a grid of `days` days with `slots_per_day` periods each.
    pub fn new(days: u8, slots_per_day: u8) -> Self {
        Self {
            days,
            slots_per_day,
        }
    }

    /// Number of teaching days.
    #[inline]
    pub fn days(&self) -> u8 {
        self.days
    }

    /// Periods per day.
    #[inline]
    pub fn slots_per_day(&self) -> u8 {
        self.slots_per_day
    }

    /// Whether `(day, slot)` lies inside the grid (both 1-based).
    pub fn contains(&self, day: u8, slot: u8) -> bool {
        (1..=self.days).contains(&day) && (1..=self.slots_per_day).contains(&slot)
    }

    /// Whether a block of `block` slots starting at `slot` is aligned
    /// and fits within the day.
    pub fn block_fits(&self, slot: u8, block: u8) -> bool {
        if block == 0 || slot == 0 {
            return false;
        }
        (slot - 1) % block == 0 && slot + block - 1 <= self.slots_per_day
    }

    /// All `(day, start_slot)` pairs where a block of `block` slots fits,
    /// in ascending day-then-slot order.
    pub fn block_starts(&self, block: u8) -> Vec<(u8, u8)> {
        let mut starts = Vec::new();
        for day in 1..=self.days {
            for slot in 1..=self.slots_per_day {
                if self.block_fits(slot, block) {
                    starts.push((day, slot));
                }
            }
        }
        starts
    }

    /// All `(day, slot)` cells in ascending order.
    pub fn all_slots(&self) -> Vec<(u8, u8)> {
        self.block_starts(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let grid = TimeGrid::new(6, 5);
        assert!(grid.contains(1, 1));
        assert!(grid.contains(6, 5));
        assert!(!grid.contains(0, 1));
        assert!(!grid.contains(1, 0));
        assert!(!grid.contains(7, 1));
        assert!(!grid.contains(1, 6));
    }

    #[test]
    fn test_block_alignment() {
        let grid = TimeGrid::new(6, 5);
        // Blocks of 2 start at odd slots only, and slot 5 has no room left.
        assert!(grid.block_fits(1, 2));
        assert!(!grid.block_fits(2, 2));
        assert!(grid.block_fits(3, 2));
        assert!(!grid.block_fits(4, 2));
        assert!(!grid.block_fits(5, 2));
    }

    #[test]
    fn test_single_slot_blocks() {
        let grid = TimeGrid::new(6, 5);
        for slot in 1..=5 {
            assert!(grid.block_fits(slot, 1));
        }
        assert!(!grid.block_fits(6, 1));
    }

    #[test]
    fn test_block_starts() {
        let grid = TimeGrid::new(2, 5);
        let starts = grid.block_starts(2);
        assert_eq!(starts, vec![(1, 1), (1, 3), (2, 1), (2, 3)]);

        let all = grid.all_slots();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], (1, 1));
        assert_eq!(all[9], (2, 5));
    }

    #[test]
    fn test_degenerate_blocks() {
        let grid = TimeGrid::new(6, 5);
        assert!(!grid.block_fits(1, 0));
        assert!(!grid.block_fits(0, 2));
        assert!(grid.block_starts(6).is_empty());
    }
}
