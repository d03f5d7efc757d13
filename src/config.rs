//! Engine configuration.
//!
//! Everything that was a literal in early versions of this engine is a
//! field here: grid dimensions, the densifier's daily minimum, the lab
//! block size, the per-subject attempt budget, and the RNG seed. One
//! `EngineConfig` is owned by one [`crate::engine::TimetableEngine`] and
//! applies to every generation call it serves.

use serde::{Deserialize, Serialize};

use crate::models::TimeGrid;

/// A synthetic subject used to fill otherwise-free slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerSubject {
    /// Identifier written into filler assignments.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl FillerSubject {
    /// Creates a filler subject.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Policy for filling free slots after required subjects are placed.
///
/// Sections in semesters below `pivot_semester` receive `lower`
/// (typically a library period); sections at or above it receive
/// `upper` (typically internship time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillerPolicy {
    /// Filler for semesters below the pivot.
    pub lower: FillerSubject,
    /// Filler for semesters at or above the pivot.
    pub upper: FillerSubject,
    /// First semester that receives the upper filler.
    pub pivot_semester: u8,
}

impl Default for FillerPolicy {
    fn default() -> Self {
        Self {
            lower: FillerSubject::new("LIB", "Library Period"),
            upper: FillerSubject::new("INTERN", "Internship"),
            pivot_semester: 5,
        }
    }
}

impl FillerPolicy {
    /// Returns the filler subject for a section's semester.
    pub fn for_semester(&self, semester: u8) -> &FillerSubject {
        if semester >= self.pivot_semester {
            &self.upper
        } else {
            &self.lower
        }
    }
}

/// Tunable parameters for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Teaching days per week (day 1 = Monday).
    pub days: u8,
    /// Periods per day.
    pub slots_per_day: u8,
    /// Minimum assignments per section per day the densifier enforces.
    pub min_per_day: usize,
    /// Contiguous slots one lab/practical session occupies.
    pub lab_block_size: u8,
    /// Placement attempts per subject before accepting a shortfall.
    pub placement_attempts: u32,
    /// Failed attempts after which candidate slots are scanned in
    /// ascending order instead of shuffled with day-spread preference.
    pub deterministic_after: u32,
    /// Free-slot filler policy. `None` leaves free slots free.
    pub fillers: Option<FillerPolicy>,
    /// RNG seed. `None` seeds from OS entropy on each call.
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Creates a configuration for a `days` x `slots_per_day` grid with
    /// default budgets.
    pub fn new(days: u8, slots_per_day: u8) -> Self {
        Self {
            days,
            slots_per_day,
            min_per_day: 3,
            lab_block_size: 2,
            placement_attempts: 500,
            deterministic_after: 250,
            fillers: None,
            seed: None,
        }
    }

    /// Six days of five periods.
    pub fn five_period() -> Self {
        Self::new(6, 5)
    }

    /// Six days of seven periods.
    pub fn seven_period() -> Self {
        Self::new(6, 7)
    }

    /// Sets the daily minimum enforced by the densifier.
    pub fn with_min_per_day(mut self, min_per_day: usize) -> Self {
        self.min_per_day = min_per_day;
        self
    }

    /// Sets the lab block size.
    pub fn with_lab_block_size(mut self, lab_block_size: u8) -> Self {
        self.lab_block_size = lab_block_size;
        self
    }

    /// Sets the per-subject placement attempt budget.
    pub fn with_placement_attempts(mut self, attempts: u32) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Sets the attempt count at which slot scanning turns deterministic.
    pub fn with_deterministic_after(mut self, attempts: u32) -> Self {
        self.deterministic_after = attempts;
        self
    }

    /// Enables the free-slot filler pass.
    pub fn with_fillers(mut self, policy: FillerPolicy) -> Self {
        self.fillers = Some(policy);
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The time grid this configuration describes.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::new(self.days, self.slots_per_day)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::five_period()
    }
}
