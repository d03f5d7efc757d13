//! Three-axis occupancy index.
//!
//! Tracks which grid cells are taken per section, per teacher, and per
//! room. One index is owned by one generation run and discarded with it;
//! nothing here is process-wide.

use std::collections::HashSet;

use crate::models::Assignment;

type Key = (String, u8, u8);

/// Membership structure over the three uniqueness axes.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    sections: HashSet<Key>,
    staff: HashSet<Key>,
    rooms: HashSet<Key>,
}

impl OccupancyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index seeded with existing assignments.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut index = Self::new();
        for a in assignments {
            index.reserve(a);
        }
        index
    }

    /// Whether the section is free at `(day, slot)`.
    pub fn section_free(&self, section_id: &str, day: u8, slot: u8) -> bool {
        !self
            .sections
            .contains(&(section_id.to_string(), day, slot))
    }

    /// Whether the teacher is free at `(day, slot)`.
    pub fn staff_free(&self, staff_id: &str, day: u8, slot: u8) -> bool {
        !self.staff.contains(&(staff_id.to_string(), day, slot))
    }

    /// Whether the room is free at `(day, slot)`.
    pub fn room_free(&self, room_id: &str, day: u8, slot: u8) -> bool {
        !self.rooms.contains(&(room_id.to_string(), day, slot))
    }

    /// Whether all three axes of an assignment are free.
    pub fn accepts(&self, a: &Assignment) -> bool {
        self.section_free(&a.section_id, a.day, a.slot)
            && self.staff_free(&a.staff_id, a.day, a.slot)
            && self.room_free(&a.room_id, a.day, a.slot)
    }

    /// Marks all three axes of an assignment as taken.
    pub fn reserve(&mut self, a: &Assignment) {
        self.sections
            .insert((a.section_id.clone(), a.day, a.slot));
        self.staff.insert((a.staff_id.clone(), a.day, a.slot));
        self.rooms.insert((a.room_id.clone(), a.day, a.slot));
    }

    /// Number of occupied cells for a section on a day.
    pub fn section_count_on(&self, section_id: &str, day: u8) -> usize {
        self.sections
            .iter()
            .filter(|(id, d, _)| id == section_id && *d == day)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Assignment {
        Assignment::new("S1", "SUB1", "T1", "R1", 1, 1, 3)
    }

    #[test]
    fn test_empty_index_accepts() {
        let index = OccupancyIndex::new();
        assert!(index.accepts(&sample()));
    }

    #[test]
    fn test_reserve_blocks_all_axes() {
        let mut index = OccupancyIndex::new();
        index.reserve(&sample());

        assert!(!index.section_free("S1", 1, 1));
        assert!(!index.staff_free("T1", 1, 1));
        assert!(!index.room_free("R1", 1, 1));

        // Same cell, different entities: section axis differs.
        let other_section = Assignment::new("S2", "SUB1", "T2", "R2", 1, 1, 3);
        assert!(index.accepts(&other_section));

        // Same staff elsewhere in the grid is fine.
        assert!(index.staff_free("T1", 1, 2));
        assert!(index.staff_free("T1", 2, 1));
    }

    #[test]
    fn test_conflict_on_single_axis() {
        let mut index = OccupancyIndex::new();
        index.reserve(&sample());

        // Only the room collides.
        let room_clash = Assignment::new("S2", "SUB2", "T2", "R1", 1, 1, 3);
        assert!(!index.accepts(&room_clash));
    }

    #[test]
    fn test_from_assignments() {
        let list = vec![
            Assignment::new("S1", "SUB1", "T1", "R1", 1, 1, 3),
            Assignment::new("S1", "SUB1", "T1", "R1", 1, 2, 3),
            Assignment::new("S1", "SUB2", "T2", "R2", 2, 1, 3),
        ];
        let index = OccupancyIndex::from_assignments(&list);

        assert_eq!(index.section_count_on("S1", 1), 2);
        assert_eq!(index.section_count_on("S1", 2), 1);
        assert_eq!(index.section_count_on("S1", 3), 0);
        assert_eq!(index.section_count_on("S2", 1), 0);
    }
}
