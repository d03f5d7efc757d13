//! Subject (course) model.
//!
//! A subject carries its weekly hour quota and a type that drives
//! placement: lab and practical subjects occupy a contiguous block of
//! slots per session and must sit in a lab-typed room.

use serde::{Deserialize, Serialize};

/// A course to be placed on the weekly grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Course code (e.g., "MATH101").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Owning department identifier.
    pub department_id: String,
    /// Semester the subject is taught in.
    pub semester: u8,
    /// Period-instances that must be scheduled per week.
    pub hours_per_week: u32,
    /// Placement classification.
    pub subject_type: SubjectType,
}

/// Subject classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    /// Lecture-style teaching, one slot per session, any room.
    Theory,
    /// Laboratory session, contiguous block, lab room.
    Lab,
    /// Practical session, contiguous block, lab room.
    Practical,
    /// Project work, one slot per session, any room.
    Project,
}

impl SubjectType {
    /// Whether sessions occupy a contiguous multi-slot block.
    pub fn needs_block(&self) -> bool {
        matches!(self, SubjectType::Lab | SubjectType::Practical)
    }

    /// Whether sessions must be held in a lab-typed room.
    pub fn needs_lab_room(&self) -> bool {
        self.needs_block()
    }
}

impl Subject {
    /// Creates a new subject of the given type.
    pub fn new(id: impl Into<String>, subject_type: SubjectType) -> Self {
        let id = id.into();
        Self {
            code: id.clone(),
            id,
            name: String::new(),
            department_id: String::new(),
            semester: 1,
            hours_per_week: 1,
            subject_type,
        }
    }

    /// Creates a theory subject.
    pub fn theory(id: impl Into<String>) -> Self {
        Self::new(id, SubjectType::Theory)
    }

    /// Creates a lab subject.
    pub fn lab(id: impl Into<String>) -> Self {
        Self::new(id, SubjectType::Lab)
    }

    /// Creates a practical subject.
    pub fn practical(id: impl Into<String>) -> Self {
        Self::new(id, SubjectType::Practical)
    }

    /// Creates a project subject.
    pub fn project(id: impl Into<String>) -> Self {
        Self::new(id, SubjectType::Project)
    }

    /// Sets the course code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
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

    /// Sets the weekly hour quota.
    pub fn with_hours(mut self, hours_per_week: u32) -> Self {
        self.hours_per_week = hours_per_week;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::theory("SUB1")
            .with_code("MATH101")
            .with_name("Mathematics I")
            .with_department("CSE")
            .with_semester(3)
            .with_hours(4);

        assert_eq!(s.id, "SUB1");
        assert_eq!(s.code, "MATH101");
        assert_eq!(s.semester, 3);
        assert_eq!(s.hours_per_week, 4);
        assert_eq!(s.subject_type, SubjectType::Theory);
    }

    #[test]
    fn test_code_defaults_to_id() {
        let s = Subject::lab("PHYLAB01");
        assert_eq!(s.code, "PHYLAB01");
    }

    #[test]
    fn test_block_requirements() {
        assert!(SubjectType::Lab.needs_block());
        assert!(SubjectType::Practical.needs_block());
        assert!(!SubjectType::Theory.needs_block());
        assert!(!SubjectType::Project.needs_block());

        assert!(SubjectType::Lab.needs_lab_room());
        assert!(!SubjectType::Theory.needs_lab_room());
    }
}
