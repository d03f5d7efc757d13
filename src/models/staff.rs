//! Staff (teacher) model.

use serde::{Deserialize, Serialize};

/// A staff member who can be assigned to teach subjects.
///
/// `max_hours_per_week` is a load-balancing preference, not a hard
/// constraint: the scheduler favors the least-loaded eligible teacher
/// but will exceed the cap rather than leave a class unstaffed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    /// Unique staff identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Owning department identifier.
    pub department_id: String,
    /// Preferred weekly teaching hour cap.
    pub max_hours_per_week: u32,
}

impl Staff {
    /// Creates a new staff member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            department_id: String::new(),
            max_hours_per_week: 20,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department_id: impl Into<String>) -> Self {
        self.department_id = department_id.into();
        self
    }

    /// Sets the preferred weekly hour cap.
    pub fn with_max_hours(mut self, max_hours_per_week: u32) -> Self {
        self.max_hours_per_week = max_hours_per_week;
        self
    }
}
