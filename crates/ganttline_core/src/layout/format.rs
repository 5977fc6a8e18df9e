//! Fixed-locale (pt-BR) labels for the task table and timeline.

use chrono::{Datelike, NaiveDate};

/// Month captions of the timeline header, January first.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Fixed quarter captions used when no live quarter records are shown.
pub const FIXED_QUARTER_LABELS: [&str; 4] = [
    "1º trimestre",
    "2º trimestre",
    "3º trimestre",
    "4º trimestre",
];

const WEEKDAY_LABELS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Placeholder for an absent actual date.
pub const NOT_DEFINED_LABEL: &str = "ND";
/// Tooltip end label for work that has started but not finished.
pub const IN_PROGRESS_LABEL: &str = "Em andamento";

/// Formats a date as `"Seg 14/01/25"`.
pub fn format_date(date: NaiveDate) -> String {
    let weekday = WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize];
    format!("{weekday} {}", date.format("%d/%m/%y"))
}

/// Formats an optional actual date, rendering `"ND"` when absent.
pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date)
        .unwrap_or_else(|| NOT_DEFINED_LABEL.to_string())
}

/// Formats a date as `"14/01/25"` for compact tooltips.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%y").to_string()
}

pub fn duration_label(days: u32) -> String {
    format!("{days} dias")
}

pub fn checked_marker(checked: bool) -> &'static str {
    if checked {
        "✓"
    } else {
        "□"
    }
}

pub fn progress_caption(percent: u8) -> String {
    format!("{percent}% concluído")
}

pub fn planned_tooltip(name: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{name} - Previsto: {} a {}",
        format_date(start),
        format_date(end)
    )
}

pub fn actual_tooltip(name: &str, start: NaiveDate, end: Option<NaiveDate>) -> String {
    let end_label = end
        .map(format_date)
        .unwrap_or_else(|| IN_PROGRESS_LABEL.to_string());
    format!("{name} - Real: {} a {end_label}", format_date(start))
}

pub fn quarter_tooltip(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} a {}", format_short_date(start), format_short_date(end))
}

#[cfg(test)]
mod tests {
    use super::{actual_tooltip, format_date, format_optional_date, planned_tooltip};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn format_date_uses_weekday_and_short_year() {
        assert_eq!(format_date(date(2025, 1, 14)), "Ter 14/01/25");
        assert_eq!(format_date(date(2025, 6, 1)), "Dom 01/06/25");
        assert_eq!(format_date(date(2025, 11, 15)), "Sáb 15/11/25");
    }

    #[test]
    fn absent_dates_render_placeholder() {
        assert_eq!(format_optional_date(None), "ND");
    }

    #[test]
    fn tooltips_name_the_range() {
        assert_eq!(
            planned_tooltip("Pesquisa", date(2025, 1, 14), date(2025, 2, 10)),
            "Pesquisa - Previsto: Ter 14/01/25 a Seg 10/02/25"
        );
        assert_eq!(
            actual_tooltip("Pesquisa", date(2025, 1, 20), None),
            "Pesquisa - Real: Seg 20/01/25 a Em andamento"
        );
    }
}
