//! Typed field edits and raw form-input parsing.
//!
//! # Responsibility
//! - Describe every single-field mutation an editor surface may request.
//! - Convert raw form text into typed field values.
//!
//! # Invariants
//! - An edit only touches the field its variant names.
//! - Numeric parse failures fall back to zero, so a field is never left unset.
//! - Malformed dates are rejected here and never reach the layout engine.

use crate::model::quarter::Quarter;
use crate::model::task::{Percent, Task, TaskLevel};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// One field mutation on a task working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEdit {
    Name(String),
    Level(TaskLevel),
    Checked(bool),
    DurationDays(u32),
    StartPlanned(NaiveDate),
    EndPlanned(NaiveDate),
    StartActual(Option<NaiveDate>),
    EndActual(Option<NaiveDate>),
    Percent(Percent),
    CompletedTasks(Option<String>),
}

/// Text-input fields of the task form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Level,
    DurationDays,
    StartPlanned,
    EndPlanned,
    StartActual,
    EndActual,
    Percent,
    CompletedTasks,
}

impl TaskEdit {
    /// Returns whether the progress-only editor may apply this edit.
    pub fn is_progress(&self) -> bool {
        matches!(self, Self::Percent(_))
    }

    /// Builds the edit for raw form text typed into `field`.
    pub fn from_form(field: TaskField, input: &str) -> Result<Self, FieldParseError> {
        Ok(match field {
            TaskField::Name => Self::Name(input.to_string()),
            TaskField::Level => Self::Level(parse_level(input)?),
            TaskField::DurationDays => Self::DurationDays(parse_count_or_zero(input)),
            TaskField::StartPlanned => Self::StartPlanned(parse_date(input)?),
            TaskField::EndPlanned => Self::EndPlanned(parse_date(input)?),
            TaskField::StartActual => Self::StartActual(parse_optional_date(input)?),
            TaskField::EndActual => Self::EndActual(parse_optional_date(input)?),
            TaskField::Percent => Self::Percent(parse_percent(input)),
            TaskField::CompletedTasks => Self::CompletedTasks(parse_optional_text(input)),
        })
    }
}

/// One field mutation on a quarter working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarterEdit {
    Name(String),
    StartDate(NaiveDate),
    EndDate(NaiveDate),
}

impl Task {
    /// Applies one typed field edit in place.
    ///
    /// Validation is deferred to commit time so intermediate states (for
    /// example moving both ends of a range) stay editable.
    pub fn apply(&mut self, edit: TaskEdit) {
        match edit {
            TaskEdit::Name(name) => self.name = name,
            TaskEdit::Level(level) => self.level = level,
            TaskEdit::Checked(checked) => self.checked = checked,
            TaskEdit::DurationDays(days) => self.duration_days = days,
            TaskEdit::StartPlanned(date) => self.start_planned = date,
            TaskEdit::EndPlanned(date) => self.end_planned = date,
            TaskEdit::StartActual(date) => self.start_actual = date,
            TaskEdit::EndActual(date) => self.end_actual = date,
            TaskEdit::Percent(percent) => self.percent = Some(percent),
            TaskEdit::CompletedTasks(note) => self.completed_tasks = note,
        }
    }
}

impl Quarter {
    /// Applies one typed field edit in place.
    pub fn apply(&mut self, edit: QuarterEdit) {
        match edit {
            QuarterEdit::Name(name) => self.name = name,
            QuarterEdit::StartDate(date) => self.start_date = date,
            QuarterEdit::EndDate(date) => self.end_date = date,
        }
    }
}

/// Errors from raw form-input parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    /// Input is not `YYYY-MM-DD` or names a day that does not exist.
    InvalidDate(String),
    /// Input is not one of the supported levels.
    InvalidLevel(String),
}

impl Display for FieldParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::InvalidLevel(value) => write!(f, "invalid level `{value}`; expected 1, 2 or 3"),
        }
    }
}

impl Error for FieldParseError {}

/// Parses a non-negative count (e.g. duration in days).
///
/// Non-numeric or negative input yields `0`.
pub fn parse_count_or_zero(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0)
}

/// Parses a progress percentage, clamping to `0..=100`.
///
/// Non-numeric input yields `0`; negative input clamps to `0`.
pub fn parse_percent(input: &str) -> Percent {
    match input.trim().parse::<i64>() {
        Ok(value) => Percent::saturating(value.clamp(0, 100) as u32),
        Err(_) => Percent::ZERO,
    }
}

pub fn parse_level(input: &str) -> Result<TaskLevel, FieldParseError> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|value| TaskLevel::try_from(value).ok())
        .ok_or_else(|| FieldParseError::InvalidLevel(input.to_string()))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(input: &str) -> Result<NaiveDate, FieldParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_INPUT_FORMAT)
        .map_err(|_| FieldParseError::InvalidDate(input.to_string()))
}

/// Parses an optional date field; blank input clears the field.
pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>, FieldParseError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_date(input).map(Some)
}

/// Normalizes an optional free-text note; blank input clears the field.
pub fn parse_optional_text(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        parse_count_or_zero, parse_date, parse_level, parse_optional_date, parse_percent,
        FieldParseError, TaskEdit, TaskField,
    };
    use crate::model::task::{Percent, Task, TaskLevel};
    use chrono::NaiveDate;

    #[test]
    fn count_falls_back_to_zero() {
        assert_eq!(parse_count_or_zero("12"), 12);
        assert_eq!(parse_count_or_zero(" 7 "), 7);
        assert_eq!(parse_count_or_zero("abc"), 0);
        assert_eq!(parse_count_or_zero("-3"), 0);
        assert_eq!(parse_count_or_zero(""), 0);
    }

    #[test]
    fn percent_clamps_and_falls_back() {
        assert_eq!(parse_percent("42").value(), 42);
        assert_eq!(parse_percent("140").value(), 100);
        assert_eq!(parse_percent("-5").value(), 0);
        assert_eq!(parse_percent("x").value(), 0);
    }

    #[test]
    fn level_accepts_only_known_values() {
        assert_eq!(parse_level("3"), Ok(TaskLevel::SubSubtask));
        assert_eq!(
            parse_level("4"),
            Err(FieldParseError::InvalidLevel("4".to_string()))
        );
    }

    #[test]
    fn dates_reject_malformed_input() {
        assert_eq!(
            parse_date("2025-06-03"),
            Ok(NaiveDate::from_ymd_opt(2025, 6, 3).unwrap())
        );
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("03/06/2025").is_err());
        assert_eq!(parse_optional_date("  "), Ok(None));
    }

    #[test]
    fn apply_touches_only_named_field() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let original = Task::form_default(4, today);
        let mut edited = original.clone();

        edited.apply(TaskEdit::Percent(Percent::saturating(55)));

        assert_eq!(edited.percent, Some(Percent::saturating(55)));
        assert_eq!(edited.name, original.name);
        assert_eq!(edited.start_planned, original.start_planned);
        assert!(TaskEdit::Percent(Percent::ZERO).is_progress());
        assert!(!TaskEdit::Checked(true).is_progress());
    }

    #[test]
    fn form_input_routes_through_field_parsers() {
        assert_eq!(
            TaskEdit::from_form(TaskField::DurationDays, "dez"),
            Ok(TaskEdit::DurationDays(0))
        );
        assert_eq!(
            TaskEdit::from_form(TaskField::Percent, "250"),
            Ok(TaskEdit::Percent(Percent::FULL))
        );
        assert_eq!(
            TaskEdit::from_form(TaskField::EndActual, " "),
            Ok(TaskEdit::EndActual(None))
        );
        assert_eq!(
            TaskEdit::from_form(TaskField::CompletedTasks, "  "),
            Ok(TaskEdit::CompletedTasks(None))
        );
        assert_eq!(
            TaskEdit::from_form(TaskField::CompletedTasks, "Entrevistas"),
            Ok(TaskEdit::CompletedTasks(Some("Entrevistas".to_string())))
        );
        assert!(matches!(
            TaskEdit::from_form(TaskField::StartPlanned, "31/01/2025"),
            Err(FieldParseError::InvalidDate(_))
        ));
    }
}
