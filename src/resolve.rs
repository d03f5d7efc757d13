//! Candidate validation and conflict resolution.
//!
//! Oracle output survives extraction as untyped records. Each record is
//! decoded field by field into a [`ParsedCandidate`] (the oracle mixes
//! camelCase and snake_case spellings and sometimes emits ids as
//! numbers), range-checked against the grid and target semester, and
//! then run through ordered conflict resolution: the first record to
//! claim any of its three occupancy keys wins, later claimants are
//! dropped. Only aggregate drop counts are reported.
//!
//! A final re-scan of the accepted list asserts that no duplicate key
//! survived. A violation there is a resolver defect and aborts loudly.

use std::collections::HashSet;

use log::debug;
use serde_json::Value;

use crate::error::EngineError;
use crate::models::{Assignment, TimeGrid};
use crate::occupancy::OccupancyIndex;

/// A candidate that passed field-level decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub section_id: String,
    pub subject_id: String,
    pub staff_id: String,
    pub room_id: String,
    pub day: u8,
    pub slot: u8,
    pub semester: u8,
}

impl ParsedCandidate {
    /// Converts into the engine's output record.
    pub fn into_assignment(self) -> Assignment {
        Assignment {
            section_id: self.section_id,
            subject_id: self.subject_id,
            staff_id: self.staff_id,
            room_id: self.room_id,
            day: self.day,
            slot: self.slot,
            semester: self.semester,
        }
    }
}

/// Outcome of resolving one candidate batch.
#[derive(Debug, Clone, Default)]
pub struct ResolutionSummary {
    /// Conflict-free accepted assignments, in first-seen order.
    pub accepted: Vec<Assignment>,
    /// Records dropped during field decoding or range checks.
    pub dropped_malformed: usize,
    /// Records dropped by occupancy conflicts.
    pub dropped_conflicts: usize,
}

/// Id-valued field: accepts a string or a number.
fn id_field(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match value.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// Small-integer field: accepts a number or a numeric string.
fn int_field(value: &Value, keys: &[&str]) -> Option<u8> {
    for key in keys {
        match value.get(key) {
            Some(Value::Number(n)) => return n.as_u64().and_then(|v| u8::try_from(v).ok()),
            Some(Value::String(s)) => return s.trim().parse().ok(),
            _ => {}
        }
    }
    None
}

/// Decodes one untyped record. Returns `None` when any required field is
/// missing or unusable.
pub fn decode_candidate(value: &Value) -> Option<ParsedCandidate> {
    Some(ParsedCandidate {
        section_id: id_field(value, &["sectionId", "section_id", "section"])?,
        subject_id: id_field(value, &["subjectId", "subject_id", "subject"])?,
        staff_id: id_field(value, &["staffId", "staff_id", "teacherId", "staff"])?,
        room_id: id_field(value, &["roomId", "room_id", "room"])?,
        day: int_field(value, &["day"])?,
        slot: int_field(value, &["slot", "period"])?,
        semester: int_field(value, &["semester", "sem"])?,
    })
}

/// Filters and deduplicates a candidate batch into a conflict-free list.
///
/// Earlier-listed candidates win every conflict; that tie-break is part
/// of the contract, not an accident of iteration order.
pub fn resolve_candidates(
    candidates: &[Value],
    semester: u8,
    grid: &TimeGrid,
) -> Result<ResolutionSummary, EngineError> {
    let mut summary = ResolutionSummary::default();
    let mut occupancy = OccupancyIndex::new();

    for raw in candidates {
        let Some(candidate) = decode_candidate(raw) else {
            summary.dropped_malformed += 1;
            continue;
        };
        if !grid.contains(candidate.day, candidate.slot) || candidate.semester != semester {
            summary.dropped_malformed += 1;
            continue;
        }

        let assignment = candidate.into_assignment();
        if !occupancy.accepts(&assignment) {
            summary.dropped_conflicts += 1;
            continue;
        }
        occupancy.reserve(&assignment);
        summary.accepted.push(assignment);
    }

    verify_no_duplicates(&summary.accepted)?;

    debug!(
        "resolved {} candidates: {} accepted, {} malformed, {} conflicts",
        candidates.len(),
        summary.accepted.len(),
        summary.dropped_malformed,
        summary.dropped_conflicts
    );
    Ok(summary)
}

/// Re-scans an accepted list for residual duplicate occupancy keys.
///
/// Structurally impossible after resolution; a hit means the resolver
/// itself is defective.
fn verify_no_duplicates(accepted: &[Assignment]) -> Result<(), EngineError> {
    let mut sections = HashSet::new();
    let mut staff = HashSet::new();
    let mut rooms = HashSet::new();

    for a in accepted {
        if !sections.insert(a.section_key())
            || !staff.insert(a.staff_key())
            || !rooms.insert(a.room_key())
        {
            return Err(EngineError::InternalInvariant(format!(
                "duplicate occupancy key for section {} at day {} slot {}",
                a.section_id, a.day, a.slot
            )));
        }
    }
    Ok(())
}
