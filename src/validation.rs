//! Snapshot integrity checks.
//!
//! Checks structural integrity of a resolved entity snapshot before
//! scheduling. Detects:
//! - Duplicate IDs within each entity category
//! - Eligibility pairs referencing unknown staff or subjects
//! - Subjects with a zero hour quota
//! - Semesters outside the academic range
//!
//! Findings are advisory: the engine logs them and continues, because a
//! partially dirty snapshot still produces a usable (if degraded)
//! timetable.

use std::collections::HashSet;

use crate::snapshot::EntitySnapshot;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An eligibility pair references an unknown staff member or subject.
    DanglingEligibility,
    /// A subject has `hours_per_week == 0` and can never be placed.
    ZeroHourSubject,
    /// A section or subject semester is outside 1..=8.
    SemesterOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a resolved snapshot.
///
/// Returns `Ok(())` if all checks pass, `Err(errors)` with every
/// detected finding otherwise.
pub fn validate_snapshot(snapshot: &EntitySnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    let mut section_ids = HashSet::new();
    for s in &snapshot.sections {
        if !section_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section ID: {}", s.id),
            ));
        }
        if !(1..=8).contains(&s.semester) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SemesterOutOfRange,
                format!("Section '{}' has semester {}", s.id, s.semester),
            ));
        }
    }

    let mut subject_ids = HashSet::new();
    for s in &snapshot.subjects {
        if !subject_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", s.id),
            ));
        }
        if s.hours_per_week == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroHourSubject,
                format!("Subject '{}' has a zero hour quota", s.id),
            ));
        }
        if !(1..=8).contains(&s.semester) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SemesterOutOfRange,
                format!("Subject '{}' has semester {}", s.id, s.semester),
            ));
        }
    }

    let mut staff_ids = HashSet::new();
    for s in &snapshot.staff {
        if !staff_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", s.id),
            ));
        }
    }

    let mut room_ids = HashSet::new();
    for r in &snapshot.rooms {
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
    }

    for pair in &snapshot.eligibility {
        if !staff_ids.contains(pair.staff_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingEligibility,
                format!("Eligibility references unknown staff '{}'", pair.staff_id),
            ));
        }
        if !subject_ids.contains(pair.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DanglingEligibility,
                format!(
                    "Eligibility references unknown subject '{}'",
                    pair.subject_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
