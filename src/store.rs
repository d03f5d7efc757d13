//! Assignment persistence seam.
//!
//! The engine writes a finished schedule through [`AssignmentStore`]
//! with replace semantics: existing rows for the resolved sections are
//! cleared, then the new batch is upserted under the natural key
//! `(section_id, day, slot)`. When the batch upsert fails,
//! [`write_schedule`] retries record by record and only raises when
//! every single record fails.

use std::collections::HashMap;

use log::{info, warn};
use thiserror::Error;

use crate::error::EngineError;
use crate::models::Assignment;

/// A storage-layer failure for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The natural-key uniqueness constraint was violated.
    #[error("conflict on ({section_id}, day {day}, slot {slot})")]
    Conflict {
        section_id: String,
        day: u8,
        slot: u8,
    },
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Write access to persisted assignments.
///
/// Implementations must make `upsert_*` idempotent under the natural
/// key: re-writing an existing `(section, day, slot)` replaces the row.
pub trait AssignmentStore {
    /// Deletes all assignments of the given sections.
    fn clear_for_sections(&mut self, section_ids: &[String]) -> Result<(), StoreError>;
    /// Upserts a whole batch.
    fn upsert_batch(&mut self, batch: &[Assignment]) -> Result<(), StoreError>;
    /// Upserts a single assignment.
    fn upsert_one(&mut self, assignment: &Assignment) -> Result<(), StoreError>;
}

/// Replaces the stored schedule for the given sections.
///
/// Clears first, then batch-upserts. On batch failure every record is
/// retried individually; the call fails only when no record at all
/// could be written.
pub fn write_schedule(
    store: &mut dyn AssignmentStore,
    section_ids: &[String],
    batch: &[Assignment],
) -> Result<(), EngineError> {
    store
        .clear_for_sections(section_ids)
        .map_err(|e| EngineError::Persistence(e.to_string()))?;

    match store.upsert_batch(batch) {
        Ok(()) => {
            info!("wrote {} assignments for {} sections", batch.len(), section_ids.len());
            Ok(())
        }
        Err(batch_err) => {
            warn!("batch upsert failed ({batch_err}), repairing record by record");
            let mut written = 0usize;
            let mut last_err = batch_err;
            for assignment in batch {
                match store.upsert_one(assignment) {
                    Ok(()) => written += 1,
                    Err(e) => last_err = e,
                }
            }
            if written == 0 && !batch.is_empty() {
                return Err(EngineError::Persistence(format!(
                    "repair pass wrote 0/{} records, last error: {last_err}",
                    batch.len()
                )));
            }
            if written < batch.len() {
                warn!("repair pass wrote {written}/{} records", batch.len());
            }
            Ok(())
        }
    }
}

/// In-memory assignment store keyed by the natural key.
///
/// Reference implementation and test double.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rows: HashMap<(String, u8, u8), Assignment>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored assignments.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All stored assignments in unspecified order.
    pub fn all(&self) -> Vec<Assignment> {
        self.rows.values().cloned().collect()
    }

    /// The assignment at a natural key, if any.
    pub fn get(&self, section_id: &str, day: u8, slot: u8) -> Option<&Assignment> {
        self.rows.get(&(section_id.to_string(), day, slot))
    }
}

impl AssignmentStore for MemoryStore {
    fn clear_for_sections(&mut self, section_ids: &[String]) -> Result<(), StoreError> {
        self.rows
            .retain(|(section_id, _, _), _| !section_ids.contains(section_id));
        Ok(())
    }

    fn upsert_batch(&mut self, batch: &[Assignment]) -> Result<(), StoreError> {
        for assignment in batch {
            self.upsert_one(assignment)?;
        }
        Ok(())
    }

    fn upsert_one(&mut self, assignment: &Assignment) -> Result<(), StoreError> {
        self.rows.insert(
            (assignment.section_id.clone(), assignment.day, assignment.slot),
            assignment.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Vec<Assignment> {
        vec![
            Assignment::new("S1", "MATH", "T1", "R1", 1, 1, 3),
            Assignment::new("S1", "CS", "T2", "R1", 1, 2, 3),
            Assignment::new("S2", "MATH", "T1", "R1", 2, 1, 3),
        ]
    }

    #[test]
    fn test_write_replaces_existing() {
        let mut store = MemoryStore::new();
        store
            .upsert_one(&Assignment::new("S1", "OLD", "T9", "R9", 3, 3, 3))
            .unwrap();

        let sections = vec!["S1".to_string(), "S2".to_string()];
        write_schedule(&mut store, &sections, &sample_batch()).unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.get("S1", 3, 3).is_none()); // old row cleared
        assert_eq!(store.get("S1", 1, 1).unwrap().subject_id, "MATH");
    }

    #[test]
    fn test_clear_scoped_to_sections() {
        let mut store = MemoryStore::new();
        store
            .upsert_one(&Assignment::new("S9", "KEEP", "T9", "R9", 1, 1, 5))
            .unwrap();

        let sections = vec!["S1".to_string()];
        write_schedule(&mut store, &sections, &sample_batch()[..2].to_vec()).unwrap();

        // Rows of other sections survive a replace.
        assert_eq!(store.get("S9", 1, 1).unwrap().subject_id, "KEEP");
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut store = MemoryStore::new();
        let batch = sample_batch();
        store.upsert_batch(&batch).unwrap();
        store.upsert_batch(&batch).unwrap();
        assert_eq!(store.len(), 3);
    }

    /// Store whose batch path always fails and whose single path fails
    /// for a chosen section.
    struct FlakyStore {
        inner: MemoryStore,
        reject_section: Option<String>,
    }

    impl AssignmentStore for FlakyStore {
        fn clear_for_sections(&mut self, section_ids: &[String]) -> Result<(), StoreError> {
            self.inner.clear_for_sections(section_ids)
        }

        fn upsert_batch(&mut self, _batch: &[Assignment]) -> Result<(), StoreError> {
            Err(StoreError::Backend("bulk path down".into()))
        }

        fn upsert_one(&mut self, assignment: &Assignment) -> Result<(), StoreError> {
            if self.reject_section.as_deref() == Some(assignment.section_id.as_str()) {
                return Err(StoreError::Conflict {
                    section_id: assignment.section_id.clone(),
                    day: assignment.day,
                    slot: assignment.slot,
                });
            }
            self.inner.upsert_one(assignment)
        }
    }

    #[test]
    fn test_repair_pass_partial_success() {
        let mut store = FlakyStore {
            inner: MemoryStore::new(),
            reject_section: Some("S2".into()),
        };
        let sections = vec!["S1".to_string(), "S2".to_string()];

        // S2 rows fail individually, S1 rows land → overall success.
        write_schedule(&mut store, &sections, &sample_batch()).unwrap();
        assert_eq!(store.inner.len(), 2);
    }

    #[test]
    fn test_repair_pass_total_failure() {
        let mut store = FlakyStore {
            inner: MemoryStore::new(),
            reject_section: None,
        };
        // Reject everything one-by-one as well.
        struct DeadStore;
        impl AssignmentStore for DeadStore {
            fn clear_for_sections(&mut self, _: &[String]) -> Result<(), StoreError> {
                Ok(())
            }
            fn upsert_batch(&mut self, _: &[Assignment]) -> Result<(), StoreError> {
                Err(StoreError::Backend("down".into()))
            }
            fn upsert_one(&mut self, _: &Assignment) -> Result<(), StoreError> {
                Err(StoreError::Backend("down".into()))
            }
        }
        let mut dead = DeadStore;
        let sections = vec!["S1".to_string()];
        let err = write_schedule(&mut dead, &sections, &sample_batch()).unwrap_err();
        assert!(matches!(err, EngineError::Persistence(_)));

        // Sanity: the flaky store with no rejection repairs everything.
        write_schedule(&mut store, &["S1".to_string(), "S2".to_string()], &sample_batch())
            .unwrap();
        assert_eq!(store.inner.len(), 3);
    }

    #[test]
    fn test_empty_batch_is_fine() {
        let mut store = MemoryStore::new();
        write_schedule(&mut store, &["S1".to_string()], &[]).unwrap();
        assert!(store.is_empty());
    }
}
