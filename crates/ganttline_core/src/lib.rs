//! Core schedule logic for ganttline.
//! This crate is the single source of truth for layout math and record invariants.

pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use layout::calendar::{
    bar_position, bar_width, compute_year_window, day_of_year, days_in_year, is_leap_year,
    YearWindow,
};
pub use layout::projection::{
    project_schedule, QuarterCaption, QuarterHeader, QuarterMode, ScheduleLayout, TaskBars,
    TaskRow, YearBand,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::edit::{FieldParseError, QuarterEdit, TaskEdit, TaskField};
pub use model::quarter::{Quarter, QuarterId, QuarterValidationError};
pub use model::task::{Percent, Task, TaskId, TaskLevel, TaskValidationError};
pub use repo::collection::{next_id, Collection, Record, RecordId, RecordKind, RepoError, RepoResult};
pub use service::bulk_editor::BulkEditor;
pub use service::editor::{EditorError, EditorSession, ProgressEditor, TaskEditor};
pub use service::schedule_service::{Schedule, ScheduleError, ScheduleResult, ScheduleService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
