//! Fatal error taxonomy for the generation pipeline.
//!
//! Only failures that abort a generation call live here. Per-candidate
//! discards and hour shortfalls are degraded-but-successful outcomes and
//! are reported through counts and log output instead.

use thiserror::Error;

use crate::extract::ExtractionError;

/// Entity categories that must be non-empty after scope resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeCategory {
    Sections,
    Subjects,
    Staff,
    Rooms,
}

impl std::fmt::Display for ScopeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScopeCategory::Sections => "sections",
            ScopeCategory::Subjects => "subjects",
            ScopeCategory::Staff => "staff",
            ScopeCategory::Rooms => "rooms",
        };
        f.write_str(name)
    }
}

/// Errors that abort a generation call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The resolved scope is missing a mandatory entity category.
    /// Raised before any scheduling work begins.
    #[error("no {0} found for the requested scope")]
    EmptyScope(ScopeCategory),

    /// Oracle text contained no parseable structured data. Call sites
    /// with a fallback path recover from this instead of surfacing it.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The store rejected the batch and the per-record repair pass
    /// failed for every single record.
    #[error("persistence failed: {0}")]
    Persistence(String),

    /// The conflict resolver produced a duplicate occupancy key. This
    /// indicates a defect in the resolver itself, never bad input.
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_category_display() {
        assert_eq!(ScopeCategory::Sections.to_string(), "sections");
        assert_eq!(ScopeCategory::Rooms.to_string(), "rooms");
    }

    #[test]
    fn test_empty_scope_message() {
        let err = EngineError::EmptyScope(ScopeCategory::Staff);
        assert_eq!(err.to_string(), "no staff found for the requested scope");
    }
}
