//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical schedule row shown in the task table and timeline.
//! - Validate record-level invariants before a record enters a collection.
//!
//! # Invariants
//! - `id` is stable once assigned and unique within its collection.
//! - `name` is never blank.
//! - `start_planned <= end_planned`; when both actual dates are set,
//!   `start_actual <= end_actual`.
//! - `duration_days` is informational and never reconciled with dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a task row.
pub type TaskId = u32;

/// Placeholder name given to rows created by an add action.
pub const NEW_TASK_NAME: &str = "Nova Tarefa";

/// Horizontal indentation applied per nesting level, in pixels.
pub const INDENT_PER_LEVEL_PX: u32 = 12;

/// Display nesting level of a task row.
///
/// Level is a flat indentation hint. It does not link a row to a parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaskLevel {
    /// Summary/rollup row.
    Summary = 1,
    /// Nested sub-row.
    Subtask = 2,
    /// Second-level nested sub-row.
    SubSubtask = 3,
}

impl TaskLevel {
    /// Returns the numeric level (`1..=3`).
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the table indentation for this level.
    pub fn indent_px(self) -> u32 {
        u32::from(self.as_u8() - 1) * INDENT_PER_LEVEL_PX
    }
}

impl TryFrom<u8> for TaskLevel {
    type Error = TaskValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Summary),
            2 => Ok(Self::Subtask),
            3 => Ok(Self::SubSubtask),
            other => Err(TaskValidationError::InvalidLevel(other)),
        }
    }
}

impl From<TaskLevel> for u8 {
    fn from(level: TaskLevel) -> Self {
        level.as_u8()
    }
}

/// Manually entered completion percentage, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    /// Builds a percent, rejecting values above 100.
    pub fn new(value: u8) -> Result<Self, TaskValidationError> {
        if value > 100 {
            return Err(TaskValidationError::PercentOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Builds a percent, clamping values above 100.
    pub fn saturating(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the percentage as a ratio in `0.0..=1.0`.
    pub fn ratio(self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = TaskValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `name` is blank after trim.
    EmptyName,
    /// `level` outside `1..=3`.
    InvalidLevel(u8),
    /// `percent` above 100.
    PercentOutOfRange(u8),
    /// `end_planned` earlier than `start_planned`.
    InvertedPlannedRange { start: NaiveDate, end: NaiveDate },
    /// `end_actual` earlier than `start_actual`.
    InvertedActualRange { start: NaiveDate, end: NaiveDate },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be blank"),
            Self::InvalidLevel(level) => write!(f, "task level must be 1, 2 or 3, got {level}"),
            Self::PercentOutOfRange(value) => {
                write!(f, "percent must be within 0..=100, got {value}")
            }
            Self::InvertedPlannedRange { start, end } => write!(
                f,
                "endPlanned ({end}) must be >= startPlanned ({start})"
            ),
            Self::InvertedActualRange { start, end } => {
                write!(f, "endActual ({end}) must be >= startActual ({start})")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical schedule row.
///
/// Deserialization goes through [`Task::validate`], so a decoded task always
/// satisfies the record invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskWire")]
pub struct Task {
    pub id: TaskId,
    pub level: TaskLevel,
    /// "Done" flag, independent of `percent`.
    pub checked: bool,
    pub name: String,
    /// Informational only; may drift from the planned range.
    pub duration_days: u32,
    pub start_planned: NaiveDate,
    pub end_planned: NaiveDate,
    /// `None` means not started yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_actual: Option<NaiveDate>,
    /// `None` means not finished yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_actual: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<Percent>,
    /// Free-text note of work already done.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_tasks: Option<String>,
}

impl Task {
    /// Creates a task with the form-default shape used by add actions.
    ///
    /// # Invariants
    /// - Planned range is the single day `today`.
    /// - Duration and progress start at zero; actual dates are unset.
    pub fn form_default(id: TaskId, today: NaiveDate) -> Self {
        Self {
            id,
            level: TaskLevel::Subtask,
            checked: false,
            name: NEW_TASK_NAME.to_string(),
            duration_days: 0,
            start_planned: today,
            end_planned: today,
            start_actual: None,
            end_actual: None,
            percent: Some(Percent::ZERO),
            completed_tasks: Some(String::new()),
        }
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.end_planned < self.start_planned {
            return Err(TaskValidationError::InvertedPlannedRange {
                start: self.start_planned,
                end: self.end_planned,
            });
        }
        if let (Some(start), Some(end)) = (self.start_actual, self.end_actual) {
            if end < start {
                return Err(TaskValidationError::InvertedActualRange { start, end });
            }
        }
        Ok(())
    }

    /// Returns progress, treating an unset percent as zero.
    pub fn progress(&self) -> Percent {
        self.percent.unwrap_or_default()
    }

    /// Inclusive day count of the planned range.
    ///
    /// Callers may compare it with `duration_days`; the model does not.
    pub fn planned_span_days(&self) -> i64 {
        (self.end_planned - self.start_planned).num_days() + 1
    }

    /// Iterates every date present on this task.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        [self.start_planned, self.end_planned]
            .into_iter()
            .chain(self.start_actual)
            .chain(self.end_actual)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskWire {
    id: TaskId,
    level: TaskLevel,
    #[serde(default)]
    checked: bool,
    name: String,
    #[serde(default)]
    duration_days: u32,
    start_planned: NaiveDate,
    end_planned: NaiveDate,
    #[serde(default)]
    start_actual: Option<NaiveDate>,
    #[serde(default)]
    end_actual: Option<NaiveDate>,
    #[serde(default)]
    percent: Option<Percent>,
    #[serde(default)]
    completed_tasks: Option<String>,
}

impl TryFrom<TaskWire> for Task {
    type Error = TaskValidationError;

    fn try_from(wire: TaskWire) -> Result<Self, Self::Error> {
        let task = Task {
            id: wire.id,
            level: wire.level,
            checked: wire.checked,
            name: wire.name,
            duration_days: wire.duration_days,
            start_planned: wire.start_planned,
            end_planned: wire.end_planned,
            start_actual: wire.start_actual,
            end_actual: wire.end_actual,
            percent: wire.percent,
            completed_tasks: wire.completed_tasks,
        };
        task.validate()?;
        Ok(task)
    }
}
