//! Entity snapshots and scope resolution.
//!
//! A generation run operates on an immutable [`EntitySnapshot`] resolved
//! from an [`EntityRepository`] for one [`GenerationRequest`]. The
//! repository is read-only for the duration of a run.
//!
//! Teacher eligibility follows a fallback chain: explicit
//! staff–subject pairs, then any staff in the subject's department, then
//! any staff at all. A subject is never left without candidates as long
//! as the scope has staff.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ScopeCategory};
use crate::models::{Room, Section, Staff, Subject};

/// Authorization for a staff member to teach a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSubjectEligibility {
    /// Staff identifier.
    pub staff_id: String,
    /// Subject identifier.
    pub subject_id: String,
}

impl StaffSubjectEligibility {
    /// Creates an eligibility pair.
    pub fn new(staff_id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            staff_id: staff_id.into(),
            subject_id: subject_id.into(),
        }
    }
}

/// Scope of one generation call.
///
/// When `advanced_mode` is set and an explicit id list is present, that
/// list is used verbatim for the category instead of deriving from
/// department and semester.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Departments in scope.
    pub department_ids: Vec<String>,
    /// Target semester.
    pub semester: u8,
    /// Explicit section ids (advanced mode).
    pub section_ids: Option<Vec<String>>,
    /// Explicit subject ids (advanced mode).
    pub subject_ids: Option<Vec<String>>,
    /// Explicit staff ids (advanced mode).
    pub staff_ids: Option<Vec<String>>,
    /// Explicit room ids (advanced mode).
    pub room_ids: Option<Vec<String>>,
    /// Whether explicit id lists override department/semester scoping.
    pub advanced_mode: bool,
}

impl GenerationRequest {
    /// Creates a department/semester scoped request.
    pub fn new(department_ids: Vec<String>, semester: u8) -> Self {
        Self {
            department_ids,
            semester,
            ..Self::default()
        }
    }

    /// Enables advanced mode.
    pub fn advanced(mut self) -> Self {
        self.advanced_mode = true;
        self
    }

    /// Sets explicit section ids.
    pub fn with_sections(mut self, ids: Vec<String>) -> Self {
        self.section_ids = Some(ids);
        self
    }

    /// Sets explicit subject ids.
    pub fn with_subjects(mut self, ids: Vec<String>) -> Self {
        self.subject_ids = Some(ids);
        self
    }

    /// Sets explicit staff ids.
    pub fn with_staff(mut self, ids: Vec<String>) -> Self {
        self.staff_ids = Some(ids);
        self
    }

    /// Sets explicit room ids.
    pub fn with_rooms(mut self, ids: Vec<String>) -> Self {
        self.room_ids = Some(ids);
        self
    }
}

/// Immutable entity snapshot for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Sections to schedule.
    pub sections: Vec<Section>,
    /// Subjects in scope.
    pub subjects: Vec<Subject>,
    /// Staff in scope.
    pub staff: Vec<Staff>,
    /// Rooms in scope.
    pub rooms: Vec<Room>,
    /// Staff–subject eligibility pairs.
    pub eligibility: Vec<StaffSubjectEligibility>,
    /// Whether `subjects` is a verbatim explicit set that applies to
    /// every section rather than being filtered per section.
    pub explicit_subjects: bool,
}

impl EntitySnapshot {
    /// Subjects a section must be taught: the explicit set in advanced
    /// mode, otherwise the subjects of the section's department and
    /// semester.
    pub fn subjects_for_section(&self, section: &Section) -> Vec<&Subject> {
        if self.explicit_subjects {
            return self.subjects.iter().collect();
        }
        self.subjects
            .iter()
            .filter(|s| {
                s.department_id == section.department_id && s.semester == section.semester
            })
            .collect()
    }

    /// Staff allowed to teach a subject.
    ///
    /// Chain: explicit eligibility pairs → the subject's department →
    /// all staff in scope.
    pub fn eligible_staff(&self, subject: &Subject) -> Vec<&Staff> {
        let by_pair: Vec<&Staff> = self
            .staff
            .iter()
            .filter(|st| {
                self.eligibility
                    .iter()
                    .any(|e| e.subject_id == subject.id && e.staff_id == st.id)
            })
            .collect();
        if !by_pair.is_empty() {
            return by_pair;
        }

        let by_department: Vec<&Staff> = self
            .staff
            .iter()
            .filter(|st| st.department_id == subject.department_id)
            .collect();
        if !by_department.is_empty() {
            return by_department;
        }

        self.staff.iter().collect()
    }

    /// Rooms a subject's sessions may use: lab-typed rooms for subjects
    /// that need one, any room otherwise.
    pub fn eligible_rooms(&self, subject: &Subject) -> Vec<&Room> {
        if subject.subject_type.needs_lab_room() {
            self.rooms.iter().filter(|r| r.is_lab()).collect()
        } else {
            self.rooms.iter().collect()
        }
    }

    /// Looks up a subject by id.
    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// Section ids in scope, in snapshot order.
    pub fn section_ids(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.id.clone()).collect()
    }
}

/// Read-only access to the entity master data.
///
/// Implementations return owned copies; the engine never mutates the
/// backing data. A database-backed caller implements this trait; tests
/// and embedded use go through [`InMemoryRepository`].
pub trait EntityRepository {
    /// Sections of the given departments and semester.
    fn sections_in(&self, department_ids: &[String], semester: u8) -> Vec<Section>;
    /// Sections by explicit id list.
    fn sections_by_ids(&self, ids: &[String]) -> Vec<Section>;
    /// Subjects of the given departments and semester.
    fn subjects_in(&self, department_ids: &[String], semester: u8) -> Vec<Subject>;
    /// Subjects by explicit id list.
    fn subjects_by_ids(&self, ids: &[String]) -> Vec<Subject>;
    /// Staff of the given departments.
    fn staff_in(&self, department_ids: &[String]) -> Vec<Staff>;
    /// Staff by explicit id list.
    fn staff_by_ids(&self, ids: &[String]) -> Vec<Staff>;
    /// Every room.
    fn all_rooms(&self) -> Vec<Room>;
    /// Rooms by explicit id list.
    fn rooms_by_ids(&self, ids: &[String]) -> Vec<Room>;
    /// Eligibility pairs for the given subjects.
    fn eligibility_for(&self, subject_ids: &[String]) -> Vec<StaffSubjectEligibility>;
}

/// Resolves a request into a snapshot.
///
/// Every mandatory category must be non-empty; the first empty one
/// aborts with [`EngineError::EmptyScope`] before any scheduling work.
pub fn resolve_scope(
    repo: &dyn EntityRepository,
    request: &GenerationRequest,
) -> Result<EntitySnapshot, EngineError> {
    let advanced = request.advanced_mode;

    let sections = match (&request.section_ids, advanced) {
        (Some(ids), true) => repo.sections_by_ids(ids),
        _ => repo.sections_in(&request.department_ids, request.semester),
    };
    if sections.is_empty() {
        return Err(EngineError::EmptyScope(ScopeCategory::Sections));
    }

    let explicit_subjects = advanced && request.subject_ids.is_some();
    let subjects = match (&request.subject_ids, advanced) {
        (Some(ids), true) => repo.subjects_by_ids(ids),
        _ => repo.subjects_in(&request.department_ids, request.semester),
    };
    if subjects.is_empty() {
        return Err(EngineError::EmptyScope(ScopeCategory::Subjects));
    }

    let staff = match (&request.staff_ids, advanced) {
        (Some(ids), true) => repo.staff_by_ids(ids),
        _ => repo.staff_in(&request.department_ids),
    };
    if staff.is_empty() {
        return Err(EngineError::EmptyScope(ScopeCategory::Staff));
    }

    let rooms = match (&request.room_ids, advanced) {
        (Some(ids), true) => repo.rooms_by_ids(ids),
        _ => repo.all_rooms(),
    };
    if rooms.is_empty() {
        return Err(EngineError::EmptyScope(ScopeCategory::Rooms));
    }

    let subject_ids: Vec<String> = subjects.iter().map(|s| s.id.clone()).collect();
    let eligibility = repo.eligibility_for(&subject_ids);

    Ok(EntitySnapshot {
        sections,
        subjects,
        staff,
        rooms,
        eligibility,
        explicit_subjects,
    })
}

/// In-memory entity repository.
///
/// Reference implementation of [`EntityRepository`] and the fixture
/// used throughout the test suite.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    sections: Vec<Section>,
    subjects: Vec<Subject>,
    staff: Vec<Staff>,
    rooms: Vec<Room>,
    eligibility: Vec<StaffSubjectEligibility>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Adds a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a staff member.
    pub fn with_staff(mut self, staff: Staff) -> Self {
        self.staff.push(staff);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds an eligibility pair.
    pub fn with_eligibility(mut self, pair: StaffSubjectEligibility) -> Self {
        self.eligibility.push(pair);
        self
    }
}

impl EntityRepository for InMemoryRepository {
    fn sections_in(&self, department_ids: &[String], semester: u8) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| department_ids.contains(&s.department_id) && s.semester == semester)
            .cloned()
            .collect()
    }

    fn sections_by_ids(&self, ids: &[String]) -> Vec<Section> {
        self.sections
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect()
    }

    fn subjects_in(&self, department_ids: &[String], semester: u8) -> Vec<Subject> {
        self.subjects
            .iter()
            .filter(|s| department_ids.contains(&s.department_id) && s.semester == semester)
            .cloned()
            .collect()
    }

    fn subjects_by_ids(&self, ids: &[String]) -> Vec<Subject> {
        self.subjects
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect()
    }

    fn staff_in(&self, department_ids: &[String]) -> Vec<Staff> {
        self.staff
            .iter()
            .filter(|s| department_ids.contains(&s.department_id))
            .cloned()
            .collect()
    }

    fn staff_by_ids(&self, ids: &[String]) -> Vec<Staff> {
        self.staff
            .iter()
            .filter(|s| ids.contains(&s.id))
            .cloned()
            .collect()
    }

    fn all_rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    fn rooms_by_ids(&self, ids: &[String]) -> Vec<Room> {
        self.rooms
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect()
    }

    fn eligibility_for(&self, subject_ids: &[String]) -> Vec<StaffSubjectEligibility> {
        self.eligibility
            .iter()
            .filter(|e| subject_ids.contains(&e.subject_id))
            .cloned()
            .collect()
    }
}
