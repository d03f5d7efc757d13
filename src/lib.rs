//! Course-timetable assignment engine.
//!
//! Turns a snapshot of academic entities (sections, subjects, staff,
//! rooms, a weekly time grid) into a conflict-free assignment of classes
//! to time slots, under hard resource constraints and weekly hour
//! quotas. Proposals from an external generative text service are
//! treated as untrusted input; the engine can also build a schedule
//! entirely on its own.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Section`, `Subject`, `Staff`, `Room`,
//!   `TimeGrid`, `Assignment`
//! - **`snapshot`**: Entity snapshots, scope resolution, the repository
//!   seam
//! - **`extract`**: Structured-data recovery from free oracle text
//! - **`resolve`**: Candidate validation and conflict resolution
//! - **`scheduler`**: Fallback construction, densification, statistics
//! - **`occupancy`**: The three-axis availability index
//! - **`oracle`** / **`store`**: External collaborator seams
//! - **`engine`**: The generation pipeline
//! - **`validation`**: Snapshot integrity checks
//!
//! # Pipeline
//!
//! Scope resolution → (oracle proposal → extraction → conflict
//! resolution) or fallback scheduling → densification → replace-write.
//! The oracle and fallback paths are substitutive, never merged.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated
//!   Timetabling"

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod occupancy;
pub mod oracle;
pub mod resolve;
pub mod scheduler;
pub mod snapshot;
pub mod store;
pub mod validation;
