//! Timetabling domain models.
//!
//! Core data types for representing the scheduling problem and its
//! solution: the academic entities (sections, subjects, staff, rooms),
//! the weekly time grid, and the assignment record the engine emits.
//!
//! Entities are immutable snapshots for the duration of one generation
//! run; the engine never writes back to them.

mod assignment;
mod grid;
mod room;
mod section;
mod staff;
mod subject;

pub use assignment::Assignment;
pub use grid::TimeGrid;
pub use room::{Room, RoomType};
pub use section::Section;
pub use staff::Staff;
pub use subject::{Subject, SubjectType};
