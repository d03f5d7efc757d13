//! Generation pipeline.
//!
//! One call to [`TimetableEngine::generate`] runs the whole pipeline:
//!
//! 1. Resolve the request scope into an entity snapshot (fatal if any
//!    mandatory category is empty).
//! 2. If an oracle is configured, ask it for a proposal and push the
//!    text through extraction and conflict resolution. An unreachable
//!    oracle, unusable text, or zero surviving candidates switches the
//!    run to the fallback scheduler entirely; the two paths never
//!    merge their output.
//! 3. Densify to the daily minimum.
//! 4. Replace the stored schedule for the resolved sections.
//!
//! The computation is single-threaded and owns all of its state; the
//! store is only touched after the in-memory pipeline has finished.
//!
//! # Caller responsibility
//!
//! Two concurrent calls over overlapping section sets can interleave
//! their clear-then-insert sequences and lose or duplicate rows.
//! Callers must serialize generation per overlapping scope (an external
//! mutex or a queue keyed by section set), or provide an
//! [`AssignmentStore`] whose replace is transactional.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::extract;
use crate::models::Assignment;
use crate::oracle::{entity_digest, scheduling_rules, OracleRequest, TimetableOracle};
use crate::resolve::resolve_candidates;
use crate::scheduler::{Densifier, FallbackScheduler, ScheduleStats};
use crate::snapshot::{resolve_scope, EntityRepository, EntitySnapshot, GenerationRequest};
use crate::store::{write_schedule, AssignmentStore};
use crate::validation::validate_snapshot;

/// Summary of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    /// Whether the call produced and stored a schedule.
    pub success: bool,
    /// Assignments written to the store.
    pub entries_count: usize,
    /// Oracle candidates seen before validation; zero on the fallback
    /// path. Useful for judging oracle reliability.
    pub total_proposed: usize,
    /// Failure description, when `success` is false.
    pub error: Option<String>,
}

impl GenerationReport {
    /// Report for a failed call.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            entries_count: 0,
            total_proposed: 0,
            error: Some(message.into()),
        }
    }
}

/// The timetable assignment engine.
///
/// # Example
///
/// ```
/// use timetable_engine::config::EngineConfig;
/// use timetable_engine::engine::TimetableEngine;
/// use timetable_engine::models::{Room, Section, Staff, Subject};
/// use timetable_engine::snapshot::{GenerationRequest, InMemoryRepository};
/// use timetable_engine::store::MemoryStore;
///
/// let repo = InMemoryRepository::new()
///     .with_section(Section::new("S1").with_department("CSE").with_semester(3))
///     .with_subject(
///         Subject::theory("MATH101")
///             .with_department("CSE")
///             .with_semester(3)
///             .with_hours(3),
///     )
///     .with_staff(Staff::new("T1").with_department("CSE"))
///     .with_room(Room::classroom("R1"));
/// let mut store = MemoryStore::new();
///
/// let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(42));
/// let request = GenerationRequest::new(vec!["CSE".into()], 3);
/// let report = engine.generate(&repo, &mut store, &request).unwrap();
///
/// assert!(report.success);
/// assert_eq!(report.entries_count, store.len());
/// ```
pub struct TimetableEngine {
    config: EngineConfig,
    oracle: Option<Box<dyn TimetableOracle>>,
}

impl TimetableEngine {
    /// Creates an engine without an oracle; every run uses the fallback
    /// scheduler.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            oracle: None,
        }
    }

    /// Attaches a generative oracle.
    pub fn with_oracle(mut self, oracle: Box<dyn TimetableOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates and stores a timetable for the requested scope.
    ///
    /// Degraded outcomes (hour shortfalls, discarded oracle candidates)
    /// still return a successful report with counts; only the failures
    /// in [`EngineError`] abort the call.
    pub fn generate(
        &self,
        repo: &dyn EntityRepository,
        store: &mut dyn AssignmentStore,
        request: &GenerationRequest,
    ) -> Result<GenerationReport, EngineError> {
        let snapshot = resolve_scope(repo, request)?;
        if let Err(findings) = validate_snapshot(&snapshot) {
            for finding in &findings {
                warn!("snapshot integrity: {}", finding.message);
            }
        }

        let mut total_proposed = 0usize;
        let scheduled =
            match self.oracle_proposal(&snapshot, request.semester, &mut total_proposed)? {
                Some(accepted) => accepted,
                None => {
                    let mut rng = match self.config.seed {
                        Some(seed) => SmallRng::seed_from_u64(seed),
                        None => SmallRng::from_os_rng(),
                    };
                    FallbackScheduler::new(&self.config).run(&snapshot, &mut rng)
                }
            };

        let densified = Densifier::new(&self.config).run(&snapshot, scheduled);

        let stats = ScheduleStats::from_assignments(&densified);
        for shortfall in stats.shortfalls(&snapshot) {
            warn!(
                "section {}: subject {} ended at {}/{} hours",
                shortfall.section_id,
                shortfall.subject_id,
                shortfall.scheduled,
                shortfall.required
            );
        }

        let section_ids = snapshot.section_ids();
        write_schedule(store, &section_ids, &densified)?;

        info!(
            "generation complete: {} assignments for {} sections",
            densified.len(),
            section_ids.len()
        );
        Ok(GenerationReport {
            success: true,
            entries_count: densified.len(),
            total_proposed,
            error: None,
        })
    }

    /// Runs the oracle path.
    ///
    /// `Ok(None)` means the proposal is unusable and the caller must
    /// fall back. Only a resolver invariant violation propagates as an
    /// error.
    fn oracle_proposal(
        &self,
        snapshot: &EntitySnapshot,
        semester: u8,
        total_proposed: &mut usize,
    ) -> Result<Option<Vec<Assignment>>, EngineError> {
        let Some(oracle) = &self.oracle else {
            return Ok(None);
        };

        let grid = self.config.grid();
        let request = OracleRequest {
            digest: entity_digest(snapshot),
            rules: scheduling_rules(&grid, semester),
        };

        let text = match oracle.propose(&request) {
            Ok(text) => text,
            Err(e) => {
                warn!("{e}, using fallback scheduler");
                return Ok(None);
            }
        };
        let candidates = match extract::extract_array(&text) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("{e}, using fallback scheduler");
                return Ok(None);
            }
        };
        *total_proposed = candidates.len();

        let summary = resolve_candidates(&candidates, semester, &grid)?;
        if summary.accepted.is_empty() {
            warn!(
                "oracle proposed {} candidates, none valid, using fallback scheduler",
                candidates.len()
            );
            return Ok(None);
        }
        info!(
            "oracle path: accepted {}/{} candidates ({} malformed, {} conflicts)",
            summary.accepted.len(),
            candidates.len(),
            summary.dropped_malformed,
            summary.dropped_conflicts
        );
        Ok(Some(summary.accepted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeCategory;
    use crate::models::{Room, Section, Staff, Subject};
    use crate::oracle::OracleUnavailable;
    use crate::store::MemoryStore;
    use std::collections::HashSet;

    use crate::snapshot::InMemoryRepository;

    /// Oracle returning a fixed response.
    struct ScriptedOracle(String);

    impl TimetableOracle for ScriptedOracle {
        fn propose(&self, _request: &OracleRequest) -> Result<String, OracleUnavailable> {
            Ok(self.0.clone())
        }
    }

    /// Oracle that always fails.
    struct DownOracle;

    impl TimetableOracle for DownOracle {
        fn propose(&self, _request: &OracleRequest) -> Result<String, OracleUnavailable> {
            Err(OracleUnavailable("connection refused".into()))
        }
    }

    fn sample_repo() -> InMemoryRepository {
        InMemoryRepository::new()
            .with_section(
                Section::new("S1")
                    .with_name("CSE-3A")
                    .with_department("CSE")
                    .with_semester(3),
            )
            .with_subject(
                Subject::theory("MATH101")
                    .with_department("CSE")
                    .with_semester(3)
                    .with_hours(3),
            )
            .with_subject(
                Subject::lab("PHYLAB01")
                    .with_department("CSE")
                    .with_semester(3)
                    .with_hours(2),
            )
            .with_staff(Staff::new("T1").with_department("CSE"))
            .with_staff(Staff::new("T2").with_department("CSE"))
            .with_room(Room::classroom("R1"))
            .with_room(Room::lab("L1"))
    }

    fn cse_request() -> GenerationRequest {
        GenerationRequest::new(vec!["CSE".to_string()], 3)
    }

    fn assert_invariants(assignments: &[Assignment], days: u8, slots: u8) {
        let mut sections = HashSet::new();
        let mut staff = HashSet::new();
        let mut rooms = HashSet::new();
        for a in assignments {
            assert!(sections.insert(a.section_key()));
            assert!(staff.insert(a.staff_key()));
            assert!(rooms.insert(a.room_key()));
            assert!((1..=days).contains(&a.day));
            assert!((1..=slots).contains(&a.slot));
        }
    }

    #[test]
    fn test_end_to_end_fallback_path() {
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(42));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let report = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        assert!(report.success);
        assert_eq!(report.total_proposed, 0);
        assert_eq!(report.entries_count, store.len());

        let stored = store.all();
        assert_invariants(&stored, 6, 5);

        // Quotas reached; the densifier then repeats the theory subject
        // to top days up, so only the lab count is exact.
        let stats = ScheduleStats::from_assignments(&stored);
        assert!(stats.hours_for("S1", "MATH101") >= 3);
        assert_eq!(stats.hours_for("S1", "PHYLAB01"), 2);

        // Lab block: same day, adjacent slots, odd start, shared pair.
        let mut lab: Vec<_> = stored
            .iter()
            .filter(|a| a.subject_id == "PHYLAB01")
            .collect();
        lab.sort_by_key(|a| a.slot);
        assert_eq!(lab[0].day, lab[1].day);
        assert_eq!(lab[0].slot + 1, lab[1].slot);
        assert_eq!(lab[0].slot % 2, 1);
        assert_eq!(lab[0].staff_id, lab[1].staff_id);
        assert_eq!(lab[0].room_id, "L1");

        // Densifier topped every day up to the minimum where possible.
        for day in 1..=6 {
            assert!(stats.section_day_count("S1", day) >= 3, "day {day}");
        }
    }

    #[test]
    fn test_oracle_path_accepts_valid_proposal() {
        let proposal = r#"Here you go:
```json
[
  {"sectionId":"S1","subjectId":"MATH101","staffId":"T1","roomId":"R1","day":1,"slot":1,"semester":3},
  {"sectionId":"S1","subjectId":"MATH101","staffId":"T1","roomId":"R1","day":2,"slot":1,"semester":3},
  {"sectionId":"S1","subjectId":"MATH101","staffId":"T1","roomId":"R1","day":2,"slot":1,"semester":3},
  {"sectionId":"S1","subjectId":"MATH101","staffId":"T9","roomId":"R1","day":3,"slot":9,"semester":3}
]
```"#;
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(1))
            .with_oracle(Box::new(ScriptedOracle(proposal.into())));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let report = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        assert!(report.success);
        assert_eq!(report.total_proposed, 4);
        // Duplicate dropped, out-of-range dropped, the rest kept and
        // then densified upward.
        assert!(store.get("S1", 1, 1).is_some());
        assert!(store.get("S1", 2, 1).is_some());
        assert!(report.entries_count >= 2);
        assert_invariants(&store.all(), 6, 5);
    }

    #[test]
    fn test_oracle_garbage_falls_back() {
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(5))
            .with_oracle(Box::new(ScriptedOracle(
                "I am sorry, I cannot help with that.".into(),
            )));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let report = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        assert!(report.success);
        assert_eq!(report.total_proposed, 0);
        // Fallback produced the full quota anyway.
        let stats = ScheduleStats::from_assignments(&store.all());
        assert!(stats.hours_for("S1", "MATH101") >= 3);
        assert_eq!(stats.hours_for("S1", "PHYLAB01"), 2);
    }

    #[test]
    fn test_oracle_zero_valid_candidates_falls_back() {
        // Parseable array, but every record is for the wrong semester.
        let proposal = r#"[{"sectionId":"S1","subjectId":"MATH101","staffId":"T1","roomId":"R1","day":1,"slot":1,"semester":7}]"#;
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(5))
            .with_oracle(Box::new(ScriptedOracle(proposal.into())));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let report = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        assert!(report.success);
        assert_eq!(report.total_proposed, 1);
        let stats = ScheduleStats::from_assignments(&store.all());
        // Substitutive fallback: nothing from the oracle survives, so no
        // stored row carries the proposal's semester.
        assert!(store.all().iter().all(|a| a.semester == 3));
        assert!(stats.hours_for("S1", "MATH101") >= 3);
    }

    #[test]
    fn test_down_oracle_falls_back() {
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(2))
            .with_oracle(Box::new(DownOracle));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let report = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        assert!(report.success);
        assert!(report.entries_count > 0);
    }

    #[test]
    fn test_empty_scope_aborts_before_store() {
        let engine = TimetableEngine::new(EngineConfig::five_period());
        let repo = InMemoryRepository::new(); // nothing in it
        let mut store = MemoryStore::new();
        store
            .upsert_one(&Assignment::new("S1", "OLD", "T1", "R1", 1, 1, 3))
            .unwrap();

        let err = engine
            .generate(&repo, &mut store, &cse_request())
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::EmptyScope(ScopeCategory::Sections)
        ));
        // Nothing was cleared or written.
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_regeneration_replaces_rows() {
        let engine = TimetableEngine::new(EngineConfig::five_period().with_seed(42));
        let repo = sample_repo();
        let mut store = MemoryStore::new();

        let first = engine.generate(&repo, &mut store, &cse_request()).unwrap();
        let count_after_first = store.len();
        let second = engine.generate(&repo, &mut store, &cse_request()).unwrap();

        // Idempotent at section granularity: same seed, same rows.
        assert_eq!(first.entries_count, second.entries_count);
        assert_eq!(store.len(), count_after_first);
    }

    #[test]
    fn test_report_serialization() {
        let report = GenerationReport {
            success: true,
            entries_count: 30,
            total_proposed: 12,
            error: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["entriesCount"], 30);
        assert_eq!(json["totalProposed"], 12);

        let failure = GenerationReport::failure("no rooms found for the requested scope");
        assert!(!failure.success);
        assert!(failure.error.unwrap().contains("rooms"));
    }
}
