//! Calendar layout engine.
//!
//! # Responsibility
//! - Map calendar dates onto a shared proportional horizontal axis.
//! - Keep bar positions comparable across every task of a schedule.
//!
//! # Invariants
//! - Day-of-year is 0-based: January 1 maps to day `0`.
//! - Widths are inclusive of both endpoints; a same-day bar spans one day.
//! - Percentages are never clamped; out-of-window dates yield values below
//!   `0` or above `100` and the view decides whether to clip.
//! - All functions are total over valid dates and never panic.

use crate::model::task::Task;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Returns `366` for leap years and `365` otherwise.
pub fn days_in_year(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// 0-based ordinal of `date` within its own calendar year.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal0()
}

/// Left offset of `date` as a percentage of a `total_days` axis.
pub fn bar_position(date: NaiveDate, total_days: u32) -> f64 {
    f64::from(day_of_year(date)) / f64::from(total_days) * 100.0
}

/// Inclusive width of `start..=end` as a percentage of a `total_days` axis.
pub fn bar_width(start: NaiveDate, end: NaiveDate, total_days: u32) -> f64 {
    let span = i64::from(day_of_year(end)) - i64::from(day_of_year(start)) + 1;
    span as f64 / f64::from(total_days) * 100.0
}

/// Whole-calendar-year span used as the shared timeline axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearWindow {
    /// January 1 of the earliest year.
    pub start: NaiveDate,
    /// December 31 of the latest year.
    pub end: NaiveDate,
}

impl YearWindow {
    /// Builds the window covering the calendar years `first..=last`.
    ///
    /// Returns `None` when `last < first` or a year is outside chrono's range.
    pub fn for_years(first: i32, last: i32) -> Option<Self> {
        if last < first {
            return None;
        }
        Some(Self {
            start: NaiveDate::from_ymd_opt(first, 1, 1)?,
            end: NaiveDate::from_ymd_opt(last, 12, 31)?,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Returns whether the window covers exactly one calendar year.
    pub fn is_single_year(&self) -> bool {
        self.start_year() == self.end_year()
    }

    /// Calendar years covered by the window, in order.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year()..=self.end_year()
    }

    /// Day count of the whole window, summed across every year it covers.
    pub fn total_days(&self) -> u32 {
        self.years().map(days_in_year).sum()
    }

    /// Days elapsed between the window start and `date`.
    ///
    /// Negative for dates before the window. Within the first year this is
    /// equal to [`day_of_year`].
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    /// Left offset of `date` across the whole window, in percent.
    pub fn position(&self, date: NaiveDate) -> f64 {
        self.day_index(date) as f64 / f64::from(self.total_days()) * 100.0
    }

    /// Inclusive width of `start..=end` across the whole window, in percent.
    pub fn width(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let span = self.day_index(end) - self.day_index(start) + 1;
        span as f64 / f64::from(self.total_days()) * 100.0
    }

    /// Returns whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Computes the year window covering every date of every task.
///
/// Scans planned dates and any present actual dates, then widens the global
/// minimum and maximum to whole calendar years. Returns `None` for an empty
/// task list.
pub fn compute_year_window(tasks: &[Task]) -> Option<YearWindow> {
    let mut dates = tasks.iter().flat_map(Task::dates);
    let first = dates.next()?;
    let (min, max) = dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    });
    YearWindow::for_years(min.year(), max.year())
}
