//! Placement-difficulty ordering.
//!
//! Subjects that are hardest to place go first: block subjects need two
//! contiguous slots in a lab, so they see the emptiest grid; among
//! equals, higher weekly quotas come first. Lower rank = placed first,
//! following the usual priority-dispatching convention.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use crate::models::Subject;

/// Rank for placement order; lower = scheduled first.
fn placement_rank(subject: &Subject) -> (u8, i64) {
    let block = if subject.subject_type.needs_block() { 0 } else { 1 };
    (block, -i64::from(subject.hours_per_week))
}

/// Orders a subject list for placement: blocks first, then higher
/// weekly hours, stable by id.
pub fn order_for_placement(mut subjects: Vec<&Subject>) -> Vec<&Subject> {
    subjects.sort_by(|a, b| {
        placement_rank(a)
            .cmp(&placement_rank(b))
            .then_with(|| a.id.cmp(&b.id))
    });
    subjects
}
