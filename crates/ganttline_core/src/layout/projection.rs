//! View projection of a schedule.
//!
//! # Responsibility
//! - Turn task/quarter collections into everything a view draws: bar
//!   percentages, table labels, tooltips, header captions and the today line.
//!
//! # Invariants
//! - Every row is laid out against the same [`YearWindow`].
//! - Header labels repeat once per window year, so the month and quarter grid
//!   always spans the same days as the bars.
//! - Actual bars fall back to planned geometry when actual dates are missing.
//! - Projection is a pure function of its inputs.

use crate::layout::calendar::{compute_year_window, YearWindow};
use crate::layout::format::{
    actual_tooltip, checked_marker, duration_label, format_date, format_optional_date,
    planned_tooltip, progress_caption, quarter_tooltip, FIXED_QUARTER_LABELS, MONTH_LABELS,
};
use crate::model::quarter::{Quarter, QuarterId};
use crate::model::task::{Task, TaskId};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Bar geometry of one task, in percent of the window width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBars {
    pub planned_left: f64,
    pub planned_width: f64,
    pub actual_left: f64,
    pub actual_width: f64,
    /// Share of the actual bar covered by the task's progress.
    pub progress_width: f64,
}

impl TaskBars {
    /// Lays out one task against `window`.
    ///
    /// - `actual_left` falls back to `planned_left` without `start_actual`.
    /// - `actual_width` falls back to `planned_width` unless both actual
    ///   dates are present.
    pub fn for_task(task: &Task, window: &YearWindow) -> Self {
        let planned_left = window.position(task.start_planned);
        let planned_width = window.width(task.start_planned, task.end_planned);
        let actual_left = task
            .start_actual
            .map(|start| window.position(start))
            .unwrap_or(planned_left);
        let actual_width = match (task.start_actual, task.end_actual) {
            (Some(start), Some(end)) => window.width(start, end),
            _ => planned_width,
        };
        Self {
            planned_left,
            planned_width,
            actual_left,
            actual_width,
            progress_width: actual_width * task.progress().ratio(),
        }
    }

    /// Right edge of the planned bar, where a connector to the next row starts.
    pub fn planned_right(&self) -> f64 {
        self.planned_left + self.planned_width
    }
}

/// One projected table row plus its timeline bars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub task_id: TaskId,
    pub indent_px: u32,
    pub checked_marker: &'static str,
    pub name: String,
    pub duration_label: String,
    pub start_planned_label: String,
    pub end_planned_label: String,
    pub start_actual_label: String,
    pub end_actual_label: String,
    pub progress_caption: String,
    pub bars: TaskBars,
    pub planned_tooltip: String,
    /// Present only when the task has started.
    pub actual_tooltip: Option<String>,
    /// Left offset of the arrow towards the next row; `None` on the last row.
    pub connector_left: Option<f64>,
}

/// Source of the quarter captions drawn above the month header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuarterMode {
    /// Four fixed calendar quarter captions.
    #[default]
    Fixed,
    /// Live quarter records, in collection order.
    Live,
}

/// Caption of one live quarter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterCaption {
    pub quarter_id: QuarterId,
    pub name: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "captions")]
pub enum QuarterHeader {
    /// Four fixed captions per window year.
    Fixed(Vec<&'static str>),
    Live(Vec<QuarterCaption>),
}

impl QuarterHeader {
    pub fn build(mode: QuarterMode, quarters: &[Quarter], window: &YearWindow) -> Self {
        match mode {
            QuarterMode::Fixed => Self::Fixed(
                window
                    .years()
                    .flat_map(|_| FIXED_QUARTER_LABELS)
                    .collect(),
            ),
            QuarterMode::Live => Self::Live(
                quarters
                    .iter()
                    .map(|quarter| QuarterCaption {
                        quarter_id: quarter.id,
                        name: quarter.name.clone(),
                        tooltip: quarter_tooltip(quarter.start_date, quarter.end_date),
                    })
                    .collect(),
            ),
        }
    }

    /// Returns the caption texts in display order.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Fixed(labels) => labels.to_vec(),
            Self::Live(captions) => captions.iter().map(|c| c.name.as_str()).collect(),
        }
    }
}

/// Header band of one calendar year inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBand {
    pub year: i32,
    pub left: f64,
    pub width: f64,
}

/// Full render input for one schedule view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLayout {
    pub window: YearWindow,
    pub total_days: u32,
    pub years: Vec<YearBand>,
    /// Twelve month captions per window year.
    pub months: Vec<&'static str>,
    pub quarters: QuarterHeader,
    pub rows: Vec<TaskRow>,
    /// Position of the "today" marker line.
    pub today_position: f64,
}

/// Projects a schedule for rendering.
///
/// An empty task list is laid out over the calendar year of `today`.
pub fn project_schedule(
    tasks: &[Task],
    quarters: &[Quarter],
    mode: QuarterMode,
    today: NaiveDate,
) -> ScheduleLayout {
    let window = compute_year_window(tasks)
        .or_else(|| YearWindow::for_years(today.year(), today.year()))
        .unwrap_or(YearWindow {
            start: today,
            end: today,
        });

    let last_index = tasks.len().saturating_sub(1);
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(index, task)| project_row(task, &window, index < last_index))
        .collect();

    ScheduleLayout {
        window,
        total_days: window.total_days(),
        years: year_bands(&window),
        months: window.years().flat_map(|_| MONTH_LABELS).collect(),
        quarters: QuarterHeader::build(mode, quarters, &window),
        rows,
        today_position: window.position(today),
    }
}

fn year_bands(window: &YearWindow) -> Vec<YearBand> {
    window
        .years()
        .filter_map(|year| {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
            Some(YearBand {
                year,
                left: window.position(start),
                width: window.width(start, end),
            })
        })
        .collect()
}

fn project_row(task: &Task, window: &YearWindow, has_next: bool) -> TaskRow {
    let bars = TaskBars::for_task(task, window);
    TaskRow {
        task_id: task.id,
        indent_px: task.level.indent_px(),
        checked_marker: checked_marker(task.checked),
        name: task.name.clone(),
        duration_label: duration_label(task.duration_days),
        start_planned_label: format_date(task.start_planned),
        end_planned_label: format_date(task.end_planned),
        start_actual_label: format_optional_date(task.start_actual),
        end_actual_label: format_optional_date(task.end_actual),
        progress_caption: progress_caption(task.progress().value()),
        bars,
        planned_tooltip: planned_tooltip(&task.name, task.start_planned, task.end_planned),
        actual_tooltip: task
            .start_actual
            .map(|start| actual_tooltip(&task.name, start, task.end_actual)),
        connector_left: has_next.then(|| bars.planned_right()),
    }
}
