//! Section (student group) model.
//!
//! A section is one cohort of students that attends classes together.
//! Sections are immutable for the duration of a generation run.

use serde::{Deserialize, Serialize};

/// A student group that receives a weekly timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: String,
    /// Display name (e.g., "CSE-3A").
    pub name: String,
    /// Owning department identifier.
    pub department_id: String,
    /// Semester number (1..=8).
    pub semester: u8,
}

impl Section {
    /// Creates a new section.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department_id: String::new(),
            semester: 1,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = department_id.into();
        self
    }

    /// Sets the semester.
    pub fn with_semester(mut self, semester: u8) -> Self {
        self.semester = semester;
        self
    }
}
