//! Daily-load densifier.
//!
//! Post-pass that tops up any section/day below the configured minimum
//! class count. Unlike the fallback scheduler this is a backfill: it may
//! repeat subjects already scheduled that week, and it never removes or
//! overwrites an existing assignment: the output is always a superset
//! of the input.
//!
//! Only single-slot subjects are used for backfill. Block subjects
//! schedule in contiguous pairs, and a lone backfilled slot would break
//! that pairing.

use std::collections::HashMap;

use log::debug;

use super::select_staff_room;
use crate::config::EngineConfig;
use crate::models::Assignment;
use crate::occupancy::OccupancyIndex;
use crate::snapshot::EntitySnapshot;

/// Backfill pass enforcing a daily minimum per section.
#[derive(Debug)]
pub struct Densifier<'a> {
    config: &'a EngineConfig,
}

impl<'a> Densifier<'a> {
    /// Creates a densifier over the given configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Returns `assignments` plus any insertions needed to reach the
    /// daily minimum, where staff and rooms allow.
    pub fn run(
        &self,
        snapshot: &EntitySnapshot,
        assignments: Vec<Assignment>,
    ) -> Vec<Assignment> {
        let grid = self.config.grid();
        let mut occupancy = OccupancyIndex::from_assignments(&assignments);
        let mut staff_load: HashMap<String, u32> = HashMap::new();
        for a in &assignments {
            *staff_load.entry(a.staff_id.clone()).or_insert(0) += 1;
        }

        let mut out = assignments;

        for section in &snapshot.sections {
            let pool: Vec<_> = snapshot
                .subjects_for_section(section)
                .into_iter()
                .filter(|s| !s.subject_type.needs_block())
                .collect();
            if pool.is_empty() {
                continue;
            }
            let mut cursor = 0usize;

            for day in 1..=grid.days() {
                let mut count = occupancy.section_count_on(&section.id, day);
                if count >= self.config.min_per_day {
                    continue;
                }

                for slot in 1..=grid.slots_per_day() {
                    if count >= self.config.min_per_day {
                        break;
                    }
                    if !occupancy.section_free(&section.id, day, slot) {
                        continue;
                    }

                    // One lap over the subject pool per free slot.
                    let mut insertion = None;
                    for _ in 0..pool.len() {
                        let subject = pool[cursor % pool.len()];
                        cursor += 1;

                        let staff_pool = snapshot.eligible_staff(subject);
                        let room_pool = snapshot.eligible_rooms(subject);
                        if let Some((staff_id, room_id)) = select_staff_room(
                            &staff_pool,
                            &room_pool,
                            day,
                            slot,
                            1,
                            &occupancy,
                            &staff_load,
                        ) {
                            insertion = Some((subject.id.clone(), staff_id, room_id));
                            break;
                        }
                    }

                    if let Some((subject_id, staff_id, room_id)) = insertion {
                        let a = Assignment::new(
                            &section.id,
                            &subject_id,
                            &staff_id,
                            &room_id,
                            day,
                            slot,
                            section.semester,
                        );
                        occupancy.reserve(&a);
                        *staff_load.entry(staff_id).or_insert(0) += 1;
                        out.push(a);
                        count += 1;
                    }
                }

                if count < self.config.min_per_day {
                    debug!(
                        "section {}: day {day} stays at {count}/{} classes",
                        section.id, self.config.min_per_day
                    );
                }
            }
        }
        out
    }
}
