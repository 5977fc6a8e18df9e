//! FFI use-case API for the schedule view.
//!
//! # Responsibility
//! - Expose layout projection and whole-record schedule mutations to the UI.
//! - Keep calls stateless: the caller passes the schedule document in and
//!   receives the updated document back.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are reported in the response envelope, never thrown.

use chrono::NaiveDate;
use ganttline_core::model::edit::parse_date;
use ganttline_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Percent, QuarterMode, Schedule, ScheduleError, ScheduleService, Task, TaskId, TaskRow,
};
use log::warn;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Flat per-row render data for the timeline and task table.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub task_id: u32,
    pub indent_px: u32,
    pub name: String,
    pub checked_marker: String,
    pub duration_label: String,
    pub start_planned_label: String,
    pub end_planned_label: String,
    pub start_actual_label: String,
    pub end_actual_label: String,
    pub planned_left: f64,
    pub planned_width: f64,
    pub actual_left: f64,
    pub actual_width: f64,
    pub progress_width: f64,
    pub planned_tooltip: String,
    pub actual_tooltip: Option<String>,
    pub connector_left: Option<f64>,
}

/// Layout response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResponse {
    pub ok: bool,
    pub year_start: String,
    pub year_end: String,
    pub total_days: u32,
    /// Calendar years of the window; `months` and fixed `quarters` repeat
    /// once per year.
    pub years: Vec<i32>,
    pub months: Vec<String>,
    pub quarters: Vec<String>,
    pub today_position: f64,
    pub items: Vec<BarItem>,
    pub message: String,
}

impl LayoutResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            year_start: String::new(),
            year_end: String::new(),
            total_days: 0,
            years: Vec::new(),
            months: Vec::new(),
            quarters: Vec::new(),
            today_position: 0.0,
            items: Vec::new(),
            message: message.into(),
        }
    }
}

/// Mutation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleActionResponse {
    pub ok: bool,
    /// Updated schedule document on success.
    pub schedule_json: Option<String>,
    /// Id of the affected record on success.
    pub record_id: Option<u32>,
    pub message: String,
}

impl ScheduleActionResponse {
    fn success(message: impl Into<String>, schedule_json: String, record_id: u32) -> Self {
        Self {
            ok: true,
            schedule_json: Some(schedule_json),
            record_id: Some(record_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            schedule_json: None,
            record_id: None,
            message: message.into(),
        }
    }
}

/// Projects a schedule document for rendering.
///
/// Input semantics:
/// - `today`: optional `YYYY-MM-DD`; local date when absent.
/// - `live_quarters`: header shows quarter record names instead of fixed
///   captions.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_layout(
    schedule_json: String,
    today: Option<String>,
    live_quarters: bool,
) -> LayoutResponse {
    let today = match resolve_today(today) {
        Ok(today) => today,
        Err(message) => return LayoutResponse::failure(format!("schedule_layout failed: {message}")),
    };
    let schedule = match Schedule::from_json(&schedule_json) {
        Ok(schedule) => schedule,
        Err(err) => return LayoutResponse::failure(format!("schedule_layout failed: {err}")),
    };
    let mode = if live_quarters {
        QuarterMode::Live
    } else {
        QuarterMode::Fixed
    };

    let layout = ScheduleService::new(schedule).layout(mode, today);
    LayoutResponse {
        ok: true,
        year_start: layout.window.start.to_string(),
        year_end: layout.window.end.to_string(),
        total_days: layout.total_days,
        years: layout.years.iter().map(|band| band.year).collect(),
        months: layout.months.iter().map(|m| (*m).to_string()).collect(),
        quarters: layout
            .quarters
            .labels()
            .into_iter()
            .map(str::to_string)
            .collect(),
        today_position: layout.today_position,
        message: format!("Projected {} task(s).", layout.rows.len()),
        items: layout.rows.into_iter().map(to_bar_item).collect(),
    }
}

/// Appends a form-default task.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_add_task(schedule_json: String, today: Option<String>) -> ScheduleActionResponse {
    let today = match resolve_today(today) {
        Ok(today) => today,
        Err(message) => {
            return ScheduleActionResponse::failure(format!("schedule_add_task failed: {message}"))
        }
    };
    respond("schedule_add_task", "Task added.", &schedule_json, |service| {
        service.add_task(today)
    })
}

/// Replaces one task wholesale with the decoded `task_json` record.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_replace_task(schedule_json: String, task_json: String) -> ScheduleActionResponse {
    let task: Task = match decode_task(&task_json) {
        Ok(task) => task,
        Err(message) => {
            return ScheduleActionResponse::failure(format!(
                "schedule_replace_task failed: {message}"
            ))
        }
    };
    respond("schedule_replace_task", "Task saved.", &schedule_json, |service| {
        let id = task.id;
        service.replace_task(task)?;
        Ok(id)
    })
}

/// Saves a progress value through the progress-only editor flow.
///
/// `percent` above 100 is clamped.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_set_progress(
    schedule_json: String,
    task_id: u32,
    percent: u32,
) -> ScheduleActionResponse {
    respond("schedule_set_progress", "Progress saved.", &schedule_json, |service| {
        service.open_progress_editor(task_id)?;
        service.set_progress(Percent::saturating(percent))?;
        service.save_progress_editor()
    })
}

/// Removes one task by id.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_remove_task(schedule_json: String, task_id: u32) -> ScheduleActionResponse {
    respond("schedule_remove_task", "Task removed.", &schedule_json, |service| {
        service.remove_task(task_id).map(|task| task.id)
    })
}

fn respond(
    operation: &str,
    success_message: &str,
    schedule_json: &str,
    action: impl FnOnce(&mut ScheduleService) -> Result<TaskId, ScheduleError>,
) -> ScheduleActionResponse {
    match with_schedule_service(schedule_json, action) {
        Ok((json, id)) => ScheduleActionResponse::success(success_message, json, id),
        Err(err) => {
            warn!("event=ffi_action module=ffi status=error op={operation}");
            ScheduleActionResponse::failure(format!("{operation} failed: {err}"))
        }
    }
}

fn with_schedule_service(
    schedule_json: &str,
    action: impl FnOnce(&mut ScheduleService) -> Result<TaskId, ScheduleError>,
) -> Result<(String, TaskId), ScheduleError> {
    let mut service = ScheduleService::new(Schedule::from_json(schedule_json)?);
    let id = action(&mut service)?;
    Ok((service.schedule().to_json()?, id))
}

fn decode_task(task_json: &str) -> Result<Task, String> {
    serde_json::from_str::<Task>(task_json).map_err(|err| format!("invalid task: {err}"))
}

fn resolve_today(today: Option<String>) -> Result<NaiveDate, String> {
    match today {
        Some(raw) if !raw.trim().is_empty() => parse_date(&raw).map_err(|err| err.to_string()),
        _ => Ok(chrono::Local::now().date_naive()),
    }
}

fn to_bar_item(row: TaskRow) -> BarItem {
    BarItem {
        task_id: row.task_id,
        indent_px: row.indent_px,
        name: row.name,
        checked_marker: row.checked_marker.to_string(),
        duration_label: row.duration_label,
        start_planned_label: row.start_planned_label,
        end_planned_label: row.end_planned_label,
        start_actual_label: row.start_actual_label,
        end_actual_label: row.end_actual_label,
        planned_left: row.bars.planned_left,
        planned_width: row.bars.planned_width,
        actual_left: row.bars.actual_left,
        actual_width: row.bars.actual_width,
        progress_width: row.bars.progress_width,
        planned_tooltip: row.planned_tooltip,
        actual_tooltip: row.actual_tooltip,
        connector_left: row.connector_left,
    }
}
