//! Generative oracle seam.
//!
//! The oracle is an external text service asked to propose a timetable.
//! Its output is untrusted free text: everything it returns goes through
//! [`crate::extract`] and [`crate::resolve`] before a single record is
//! believed. The request carries only entity ids and display attributes,
//! never credentials or internal state.

use serde_json::json;
use thiserror::Error;

use crate::models::TimeGrid;
use crate::snapshot::EntitySnapshot;

/// The oracle could not be reached or refused to answer.
///
/// Treated exactly like unusable output: the engine falls back to its
/// own scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("oracle unavailable: {0}")]
pub struct OracleUnavailable(pub String);

/// Payload handed to the oracle.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// Serialized entity snapshot (ids and display attributes only).
    pub digest: String,
    /// Scheduling rules in plain text.
    pub rules: String,
}

/// An external generative text service.
///
/// Implementations wrap whatever transport and model the deployment
/// uses. The engine only requires text out for a request in.
pub trait TimetableOracle {
    /// Returns the oracle's free-text proposal.
    fn propose(&self, request: &OracleRequest) -> Result<String, OracleUnavailable>;
}

/// Serializes the snapshot for the oracle: ids and display attributes,
/// nothing else.
pub fn entity_digest(snapshot: &EntitySnapshot) -> String {
    let payload = json!({
        "sections": snapshot.sections.iter().map(|s| json!({
            "id": s.id,
            "name": s.name,
            "semester": s.semester,
        })).collect::<Vec<_>>(),
        "subjects": snapshot.subjects.iter().map(|s| json!({
            "id": s.id,
            "code": s.code,
            "name": s.name,
            "semester": s.semester,
            "hoursPerWeek": s.hours_per_week,
            "type": format!("{:?}", s.subject_type),
        })).collect::<Vec<_>>(),
        "staff": snapshot.staff.iter().map(|s| json!({
            "id": s.id,
            "name": s.name,
        })).collect::<Vec<_>>(),
        "rooms": snapshot.rooms.iter().map(|r| json!({
            "id": r.id,
            "number": r.number,
            "type": format!("{:?}", r.room_type),
        })).collect::<Vec<_>>(),
        "eligibility": snapshot.eligibility.iter().map(|e| json!({
            "staffId": e.staff_id,
            "subjectId": e.subject_id,
        })).collect::<Vec<_>>(),
    });
    payload.to_string()
}

/// Renders the hard scheduling rules as plain text.
pub fn scheduling_rules(grid: &TimeGrid, semester: u8) -> String {
    format!(
        "Propose a weekly timetable as a JSON array of assignments with \
         fields sectionId, subjectId, staffId, roomId, day, slot, semester.\n\
         Days run 1..={} (1 = Monday), slots 1..={} per day.\n\
         Target semester: {semester}.\n\
         No section, teacher, or room may appear twice in the same \
         (day, slot). Lab subjects need two consecutive slots in a lab \
         room, starting on an odd slot. Schedule each subject for its \
         hoursPerWeek.",
        grid.days(),
        grid.slots_per_day(),
    )
}
