//! Assignment model, the engine's sole output record.
//!
//! One assignment places one section with one subject, teacher, and room
//! into one grid cell. The natural key is `(section_id, day, slot)`;
//! `(staff_id, day, slot)` and `(room_id, day, slot)` are additional
//! uniqueness axes enforced in memory during generation.

use serde::{Deserialize, Serialize};

/// A single placed class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Section attending the class.
    pub section_id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Teacher assigned.
    pub staff_id: String,
    /// Room used.
    pub room_id: String,
    /// Day of week (1 = Monday).
    pub day: u8,
    /// Period within the day (1-based).
    pub slot: u8,
    /// Semester (denormalized for query convenience).
    pub semester: u8,
}

impl Assignment {
    /// Creates an assignment.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        section_id: impl Into<String>,
        subject_id: impl Into<String>,
        staff_id: impl Into<String>,
        room_id: impl Into<String>,
        day: u8,
        slot: u8,
        semester: u8,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            subject_id: subject_id.into(),
            staff_id: staff_id.into(),
            room_id: room_id.into(),
            day,
            slot,
            semester,
        }
    }

    /// Natural key: section occupancy of a grid cell.
    pub fn section_key(&self) -> (&str, u8, u8) {
        (&self.section_id, self.day, self.slot)
    }

    /// Staff occupancy key.
    pub fn staff_key(&self) -> (&str, u8, u8) {
        (&self.staff_id, self.day, self.slot)
    }

    /// Room occupancy key.
    pub fn room_key(&self) -> (&str, u8, u8) {
        (&self.room_id, self.day, self.slot)
    }
}
