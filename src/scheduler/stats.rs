//! Schedule statistics.
//!
//! Aggregated views over a finished assignment list: per-section daily
//! counts, scheduled hours per subject, and staff teaching loads. Used
//! for shortfall reporting and by the test suite.

use std::collections::HashMap;

use crate::models::Assignment;
use crate::snapshot::EntitySnapshot;

/// A subject that received fewer hours than its weekly quota.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortfall {
    /// Section concerned.
    pub section_id: String,
    /// Subject concerned.
    pub subject_id: String,
    /// Hours actually scheduled.
    pub scheduled: u32,
    /// Weekly quota.
    pub required: u32,
}

/// Aggregated metrics over an assignment list.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStats {
    total: usize,
    per_section_day: HashMap<(String, u8), usize>,
    per_section_subject: HashMap<(String, String), u32>,
    per_staff: HashMap<String, u32>,
}

impl ScheduleStats {
    /// Computes statistics for an assignment list.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut stats = Self {
            total: assignments.len(),
            ..Self::default()
        };
        for a in assignments {
            *stats
                .per_section_day
                .entry((a.section_id.clone(), a.day))
                .or_insert(0) += 1;
            *stats
                .per_section_subject
                .entry((a.section_id.clone(), a.subject_id.clone()))
                .or_insert(0) += 1;
            *stats.per_staff.entry(a.staff_id.clone()).or_insert(0) += 1;
        }
        stats
    }

    /// Total number of assignments.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Classes for a section on a day.
    pub fn section_day_count(&self, section_id: &str, day: u8) -> usize {
        self.per_section_day
            .get(&(section_id.to_string(), day))
            .copied()
            .unwrap_or(0)
    }

    /// Scheduled hours for a (section, subject) pair.
    pub fn hours_for(&self, section_id: &str, subject_id: &str) -> u32 {
        self.per_section_subject
            .get(&(section_id.to_string(), subject_id.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Weekly teaching load of a staff member.
    pub fn staff_load(&self, staff_id: &str) -> u32 {
        self.per_staff.get(staff_id).copied().unwrap_or(0)
    }

    /// Subjects below their weekly quota, per section.
    pub fn shortfalls(&self, snapshot: &EntitySnapshot) -> Vec<Shortfall> {
        let mut shortfalls = Vec::new();
        for section in &snapshot.sections {
            for subject in snapshot.subjects_for_section(section) {
                let scheduled = self.hours_for(&section.id, &subject.id);
                if scheduled < subject.hours_per_week {
                    shortfalls.push(Shortfall {
                        section_id: section.id.clone(),
                        subject_id: subject.id.clone(),
                        scheduled,
                        required: subject.hours_per_week,
                    });
                }
            }
        }
        shortfalls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Room, Section, Staff, Subject};

    fn sample() -> Vec<Assignment> {
        vec![
            Assignment::new("S1", "MATH", "T1", "R1", 1, 1, 3),
            Assignment::new("S1", "MATH", "T1", "R1", 2, 1, 3),
            Assignment::new("S1", "CS", "T2", "R1", 1, 2, 3),
        ]
    }

    #[test]
    fn test_counts() {
        let stats = ScheduleStats::from_assignments(&sample());
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.section_day_count("S1", 1), 2);
        assert_eq!(stats.section_day_count("S1", 3), 0);
        assert_eq!(stats.hours_for("S1", "MATH"), 2);
        assert_eq!(stats.staff_load("T1"), 2);
        assert_eq!(stats.staff_load("T9"), 0);
    }

    #[test]
    fn test_shortfalls() {
        let snapshot = EntitySnapshot {
            sections: vec![Section::new("S1").with_department("CSE").with_semester(3)],
            subjects: vec![
                Subject::theory("MATH")
                    .with_department("CSE")
                    .with_semester(3)
                    .with_hours(3),
                Subject::theory("CS")
                    .with_department("CSE")
                    .with_semester(3)
                    .with_hours(1),
            ],
            staff: vec![Staff::new("T1")],
            rooms: vec![Room::classroom("R1")],
            eligibility: vec![],
            explicit_subjects: false,
        };
        let stats = ScheduleStats::from_assignments(&sample());

        let shortfalls = stats.shortfalls(&snapshot);
        assert_eq!(shortfalls.len(), 1);
        assert_eq!(shortfalls[0].subject_id, "MATH");
        assert_eq!(shortfalls[0].scheduled, 2);
        assert_eq!(shortfalls[0].required, 3);
    }

    #[test]
    fn test_empty_list() {
        let stats = ScheduleStats::from_assignments(&[]);
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.section_day_count("S1", 1), 0);
    }
}
