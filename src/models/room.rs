//! Room model.

use serde::{Deserialize, Serialize};

/// A physical room classes can be held in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Room number or label (e.g., "B-204").
    pub number: String,
    /// Seating capacity.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
}

/// Room classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    /// Standard lecture room.
    Classroom,
    /// Laboratory; required for lab and practical sessions.
    Lab,
    /// Seminar hall, auditorium, or other space.
    Other,
}

impl Room {
    /// Creates a new room of the given type.
    pub fn new(id: impl Into<String>, room_type: RoomType) -> Self {
        Self {
            id: id.into(),
            number: String::new(),
            capacity: 60,
            room_type,
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Classroom)
    }

    /// Creates a lab room.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, RoomType::Lab)
    }

    /// Sets the room number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the seating capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether lab and practical sessions can be held here.
    #[inline]
    pub fn is_lab(&self) -> bool {
        self.room_type == RoomType::Lab
    }
}
