//! Terminal renderer for a schedule document.
//!
//! # Responsibility
//! - Load a schedule JSON file and print its projected table and timeline.
//! - Optionally emit the full layout as JSON for scripting.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use ganttline_core::model::edit::parse_date;
use ganttline_core::{
    default_log_level, init_logging, QuarterMode, Schedule, ScheduleLayout, ScheduleService,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

/// Width of the ASCII timeline in characters.
const TIMELINE_COLUMNS: usize = 60;

/// ganttline - render a Gantt schedule
#[derive(Parser, Debug)]
#[command(name = "ganttline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the schedule document
    #[arg(default_value = "demos/schedule.json")]
    input: PathBuf,

    /// Reference date (YYYY-MM-DD) for the today marker and new records
    #[arg(long)]
    today: Option<String>,

    /// Quarter header source
    #[arg(long, value_enum, default_value_t = QuartersArg::Fixed)]
    quarters: QuartersArg,

    /// Log level (trace, debug, info, warn, error); needs --log-dir
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Print the layout as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum QuartersArg {
    Fixed,
    Live,
}

impl From<QuartersArg> for QuarterMode {
    fn from(value: QuartersArg) -> Self {
        match value {
            QuartersArg::Fixed => QuarterMode::Fixed,
            QuartersArg::Live => QuarterMode::Live,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("ganttline: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, &log_dir.to_string_lossy()).map_err(|err| err.to_string())?;
    }

    let today = resolve_today(cli.today.as_deref())?;
    let raw = std::fs::read_to_string(&cli.input)
        .map_err(|err| format!("cannot read `{}`: {err}", cli.input.display()))?;
    let schedule = Schedule::from_json(&raw).map_err(|err| err.to_string())?;
    info!(
        "event=cli_load module=cli status=ok tasks={} quarters={}",
        schedule.tasks().len(),
        schedule.quarters().len()
    );

    let layout = ScheduleService::new(schedule).layout(cli.quarters.into(), today);
    if cli.json {
        let json = serde_json::to_string_pretty(&layout).map_err(|err| err.to_string())?;
        println!("{json}");
    } else {
        print!("{}", render_text(&layout));
    }
    Ok(())
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw {
        Some(raw) => parse_date(raw).map_err(|err| err.to_string()),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn render_text(layout: &ScheduleLayout) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} .. {} ({} dias)\n",
        layout.window.start, layout.window.end, layout.total_days
    ));
    let years: Vec<String> = layout.years.iter().map(|band| band.year.to_string()).collect();
    out.push_str(&format!("Anos: {}\n", years.join(" ")));
    out.push_str(&format!("Meses: {}\n", layout.months.join(" ")));
    out.push_str(&format!("Trimestres: {}\n\n", layout.quarters.labels().join(" | ")));

    for row in &layout.rows {
        let indent = " ".repeat((row.indent_px / 6) as usize);
        out.push_str(&format!(
            "{} {indent}{:<24} {:>8}  {} - {}  {} - {}  {}\n",
            row.checked_marker,
            row.name,
            row.duration_label,
            row.start_planned_label,
            row.end_planned_label,
            row.start_actual_label,
            row.end_actual_label,
            row.progress_caption,
        ));
        out.push_str(&format!(
            "  |{}|\n",
            timeline_cells(
                row.bars.planned_left,
                row.bars.planned_width,
                layout.today_position
            )
        ));
    }
    out
}

// Maps a percentage bar onto fixed columns; `#` for the bar, `!` for today.
fn timeline_cells(left: f64, width: f64, today: f64) -> String {
    let to_column = |percent: f64| -> usize {
        let column = (percent / 100.0 * TIMELINE_COLUMNS as f64).floor();
        (column.max(0.0) as usize).min(TIMELINE_COLUMNS - 1)
    };
    let start = to_column(left);
    let end = to_column(left + width).max(start);
    let today = to_column(today);

    (0..TIMELINE_COLUMNS)
        .map(|column| {
            if (start..=end).contains(&column) {
                '#'
            } else if column == today {
                '!'
            } else {
                '.'
            }
        })
        .collect()
}
