//! Deterministic fallback scheduler.
//!
//! Builds a complete schedule from the entity snapshot alone, with no
//! oracle involved. Greedy first-fit, hardest subjects first.
//!
//! # Algorithm, per section
//!
//! 1. Order the section's subjects for placement (blocks first, then
//!    higher weekly quotas).
//! 2. For each subject, repeat until its hour quota is met or the
//!    attempt budget runs out: enumerate candidate block starts,
//!    shuffle them, stable-sort so days not yet carrying this subject
//!    come first, and place on the first cell where section, a teacher,
//!    and a room are all free for the whole block. After enough failed
//!    attempts the enumeration turns into a plain ascending scan, which
//!    finds a placement whenever one exists at all.
//! 3. Shortfalls are logged and non-fatal.
//! 4. Optionally fill remaining free cells with the configured filler
//!    subject.
//!
//! Shuffling plus the day-spread preference produces a realistic weekly
//! spread; a purely ascending scan would pile every session onto the
//! earliest free day.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use super::{order_for_placement, select_staff_room};
use crate::config::EngineConfig;
use crate::models::{Assignment, Section, Subject, TimeGrid};
use crate::occupancy::OccupancyIndex;
use crate::snapshot::EntitySnapshot;

/// Oracle-free schedule constructor.
#[derive(Debug)]
pub struct FallbackScheduler<'a> {
    config: &'a EngineConfig,
}

impl<'a> FallbackScheduler<'a> {
    /// Creates a scheduler over the given configuration.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Builds a best-effort complete schedule for every section in the
    /// snapshot.
    pub fn run<R: Rng>(&self, snapshot: &EntitySnapshot, rng: &mut R) -> Vec<Assignment> {
        let grid = self.config.grid();
        let mut occupancy = OccupancyIndex::new();
        let mut staff_load: HashMap<String, u32> = HashMap::new();
        let mut out = Vec::new();

        for section in &snapshot.sections {
            let subjects = order_for_placement(snapshot.subjects_for_section(section));
            for subject in subjects {
                self.place_subject(
                    section,
                    subject,
                    snapshot,
                    &grid,
                    &mut occupancy,
                    &mut staff_load,
                    &mut out,
                    rng,
                );
            }
            if self.config.fillers.is_some() {
                self.fill_free_cells(
                    section,
                    snapshot,
                    &grid,
                    &mut occupancy,
                    &mut staff_load,
                    &mut out,
                );
            }
        }
        out
    }

    /// Places one subject's weekly hours for one section.
    #[allow(clippy::too_many_arguments)]
    fn place_subject<R: Rng>(
        &self,
        section: &Section,
        subject: &Subject,
        snapshot: &EntitySnapshot,
        grid: &TimeGrid,
        occupancy: &mut OccupancyIndex,
        staff_load: &mut HashMap<String, u32>,
        out: &mut Vec<Assignment>,
        rng: &mut R,
    ) {
        let block = if subject.subject_type.needs_block() {
            self.config.lab_block_size
        } else {
            1
        };
        let hours = subject.hours_per_week;
        let staff_pool = snapshot.eligible_staff(subject);
        let room_pool = snapshot.eligible_rooms(subject);

        if staff_pool.is_empty() || room_pool.is_empty() {
            warn!(
                "section {}: subject {} has no eligible staff or rooms, skipping",
                section.id, subject.id
            );
            return;
        }

        let mut placed: u32 = 0;
        let mut attempts: u32 = 0;
        let mut days_used: HashSet<u8> = HashSet::new();

        while placed + u32::from(block) <= hours && attempts < self.config.placement_attempts {
            attempts += 1;
            let deterministic = attempts > self.config.deterministic_after;

            let mut candidates = grid.block_starts(block);
            if !deterministic {
                candidates.shuffle(rng);
                // Stable: days not yet carrying this subject come first,
                // shuffled order is preserved within each group.
                candidates.sort_by_key(|(day, _)| days_used.contains(day));
            }

            let found = candidates.iter().find_map(|&(day, start)| {
                let section_free = (start..start + block)
                    .all(|s| occupancy.section_free(&section.id, day, s));
                if !section_free {
                    return None;
                }
                select_staff_room(
                    &staff_pool,
                    &room_pool,
                    day,
                    start,
                    block,
                    occupancy,
                    staff_load,
                )
                .map(|(staff_id, room_id)| (day, start, staff_id, room_id))
            });

            match found {
                Some((day, start, staff_id, room_id)) => {
                    for slot in start..start + block {
                        let a = Assignment::new(
                            &section.id,
                            &subject.id,
                            &staff_id,
                            &room_id,
                            day,
                            slot,
                            section.semester,
                        );
                        occupancy.reserve(&a);
                        out.push(a);
                    }
                    days_used.insert(day);
                    *staff_load.entry(staff_id).or_insert(0) += u32::from(block);
                    placed += u32::from(block);
                }
                // An exhaustive ascending scan found nothing; repeating
                // it cannot succeed, so stop burning the budget.
                None if deterministic => break,
                None => {}
            }
        }

        if placed < hours {
            warn!(
                "section {}: subject {} scheduled {placed}/{hours} hours",
                section.id, subject.id
            );
        } else {
            debug!(
                "section {}: subject {} fully scheduled in {attempts} attempts",
                section.id, subject.id
            );
        }
    }

    /// Fills every remaining free cell of a section with the filler
    /// subject for its semester.
    fn fill_free_cells(
        &self,
        section: &Section,
        snapshot: &EntitySnapshot,
        grid: &TimeGrid,
        occupancy: &mut OccupancyIndex,
        staff_load: &mut HashMap<String, u32>,
        out: &mut Vec<Assignment>,
    ) {
        let Some(policy) = &self.config.fillers else {
            return;
        };
        let filler = policy.for_semester(section.semester);
        let staff_pool: Vec<_> = snapshot.staff.iter().collect();
        let room_pool: Vec<_> = snapshot.rooms.iter().collect();

        for (day, slot) in grid.all_slots() {
            if !occupancy.section_free(&section.id, day, slot) {
                continue;
            }
            let Some((staff_id, room_id)) = select_staff_room(
                &staff_pool,
                &room_pool,
                day,
                slot,
                1,
                occupancy,
                staff_load,
            ) else {
                continue;
            };
            let a = Assignment::new(
                &section.id,
                &filler.id,
                &staff_id,
                &room_id,
                day,
                slot,
                section.semester,
            );
            occupancy.reserve(&a);
            out.push(a);
            *staff_load.entry(staff_id).or_insert(0) += 1;
        }
    }
}
