//! Schedule construction passes.
//!
//! Two passes build on the same occupancy checks:
//!
//! - [`FallbackScheduler`] constructs a complete schedule from the
//!   entity snapshot alone, greedy first-fit with hour quotas, lab
//!   block contiguity, and staff load balancing.
//! - [`Densifier`] tops up any section/day below the configured daily
//!   minimum, reusing subjects freely, never removing anything.
//!
//! [`ScheduleStats`] computes quality metrics over a finished
//! assignment list.

mod densify;
mod fallback;
mod priority;
mod stats;

pub use densify::Densifier;
pub use fallback::FallbackScheduler;
pub use priority::order_for_placement;
pub use stats::ScheduleStats;

use std::collections::HashMap;

use crate::models::{Room, Staff};
use crate::occupancy::OccupancyIndex;

/// Picks the first (staff, room) pair free for every slot of a block
/// starting at `(day, start)`.
///
/// Staff are tried in ascending order of accumulated load (ties broken
/// by id) so work spreads across the eligible pool.
pub(crate) fn select_staff_room(
    staff_pool: &[&Staff],
    room_pool: &[&Room],
    day: u8,
    start: u8,
    block: u8,
    occupancy: &OccupancyIndex,
    staff_load: &HashMap<String, u32>,
) -> Option<(String, String)> {
    let slots = start..start + block;

    let mut ranked: Vec<&Staff> = staff_pool.to_vec();
    ranked.sort_by_key(|st| (staff_load.get(&st.id).copied().unwrap_or(0), st.id.clone()));

    for staff in ranked {
        if !slots
            .clone()
            .all(|s| occupancy.staff_free(&staff.id, day, s))
        {
            continue;
        }
        for room in room_pool {
            if slots.clone().all(|s| occupancy.room_free(&room.id, day, s)) {
                return Some((staff.id.clone(), room.id.clone()));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;

    #[test]
    fn test_select_prefers_least_loaded_staff() {
        let t1 = Staff::new("T1");
        let t2 = Staff::new("T2");
        let r1 = Room::classroom("R1");
        let staff_pool = vec![&t1, &t2];
        let room_pool = vec![&r1];

        let occupancy = OccupancyIndex::new();
        let mut load = HashMap::new();
        load.insert("T1".to_string(), 5);
        load.insert("T2".to_string(), 2);

        let (staff_id, room_id) =
            select_staff_room(&staff_pool, &room_pool, 1, 1, 1, &occupancy, &load).unwrap();
        assert_eq!(staff_id, "T2");
        assert_eq!(room_id, "R1");
    }

    #[test]
    fn test_select_skips_busy_staff() {
        let t1 = Staff::new("T1");
        let t2 = Staff::new("T2");
        let r1 = Room::classroom("R1");
        let staff_pool = vec![&t1, &t2];
        let room_pool = vec![&r1];

        let mut occupancy = OccupancyIndex::new();
        // T1 is least loaded but busy at the slot.
        occupancy.reserve(&Assignment::new("S9", "X", "T1", "R9", 1, 1, 3));

        let (staff_id, _) =
            select_staff_room(&staff_pool, &room_pool, 1, 1, 1, &occupancy, &HashMap::new())
                .unwrap();
        assert_eq!(staff_id, "T2");
    }

    #[test]
    fn test_select_requires_whole_block() {
        let t1 = Staff::new("T1");
        let r1 = Room::lab("L1");
        let staff_pool = vec![&t1];
        let room_pool = vec![&r1];

        let mut occupancy = OccupancyIndex::new();
        // Second slot of the block is taken for the room.
        occupancy.reserve(&Assignment::new("S9", "X", "T9", "L1", 1, 2, 3));

        assert!(select_staff_room(
            &staff_pool,
            &room_pool,
            1,
            1,
            2,
            &occupancy,
            &HashMap::new()
        )
        .is_none());
    }

    #[test]
    fn test_select_empty_pools() {
        let occupancy = OccupancyIndex::new();
        assert!(
            select_staff_room(&[], &[], 1, 1, 1, &occupancy, &HashMap::new()).is_none()
        );
    }
}
