use chrono::NaiveDate;
use ganttline_core::{Percent, Quarter, Task, TaskLevel, TaskValidationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn form_default_sets_placeholder_shape() {
    let task = Task::form_default(7, date(2025, 5, 20));

    assert_eq!(task.id, 7);
    assert_eq!(task.level, TaskLevel::Subtask);
    assert!(!task.checked);
    assert_eq!(task.name, "Nova Tarefa");
    assert_eq!(task.duration_days, 0);
    assert_eq!(task.start_planned, date(2025, 5, 20));
    assert_eq!(task.end_planned, date(2025, 5, 20));
    assert_eq!(task.start_actual, None);
    assert_eq!(task.end_actual, None);
    assert_eq!(task.percent, Some(Percent::ZERO));
    assert!(task.validate().is_ok());

    let quarter = Quarter::form_default(3, date(2025, 5, 20));
    assert_eq!(quarter.name, "Novo Trimestre");
    assert_eq!(quarter.start_date, quarter.end_date);
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let mut task = Task::form_default(2, date(2025, 1, 14));
    task.level = TaskLevel::Summary;
    task.checked = true;
    task.duration_days = 20;
    task.end_planned = date(2025, 2, 10);
    task.start_actual = Some(date(2025, 1, 20));
    task.percent = Some(Percent::FULL);
    task.completed_tasks = Some("Entrevistas".to_string());

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 2);
    assert_eq!(json["level"], 1);
    assert_eq!(json["checked"], true);
    assert_eq!(json["durationDays"], 20);
    assert_eq!(json["startPlanned"], "2025-01-14");
    assert_eq!(json["endPlanned"], "2025-02-10");
    assert_eq!(json["startActual"], "2025-01-20");
    assert!(json.get("endActual").is_none());
    assert_eq!(json["percent"], 100);
    assert_eq!(json["completedTasks"], "Entrevistas");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn validate_rejects_inverted_planned_range() {
    let mut task = Task::form_default(1, date(2025, 3, 10));
    task.end_planned = date(2025, 3, 1);

    assert_eq!(
        task.validate().unwrap_err(),
        TaskValidationError::InvertedPlannedRange {
            start: date(2025, 3, 10),
            end: date(2025, 3, 1),
        }
    );
}

#[test]
fn validate_allows_end_actual_without_start_actual() {
    let mut task = Task::form_default(1, date(2025, 3, 10));
    task.end_actual = Some(date(2025, 1, 1));
    assert!(task.validate().is_ok());
}

#[test]
fn deserialize_rejects_invalid_records() {
    let inverted = serde_json::json!({
        "id": 1,
        "level": 2,
        "checked": false,
        "name": "bad range",
        "durationDays": 3,
        "startPlanned": "2025-05-10",
        "endPlanned": "2025-05-01"
    });
    let err = serde_json::from_value::<Task>(inverted).unwrap_err();
    assert!(
        err.to_string()
            .contains("endPlanned (2025-05-01) must be >= startPlanned (2025-05-10)"),
        "unexpected error: {err}"
    );

    let bad_level = serde_json::json!({
        "id": 1,
        "level": 4,
        "name": "too deep",
        "startPlanned": "2025-05-01",
        "endPlanned": "2025-05-01"
    });
    assert!(serde_json::from_value::<Task>(bad_level).is_err());

    let bad_percent = serde_json::json!({
        "id": 1,
        "level": 1,
        "name": "overdone",
        "startPlanned": "2025-05-01",
        "endPlanned": "2025-05-01",
        "percent": 120
    });
    assert!(serde_json::from_value::<Task>(bad_percent).is_err());

    let bad_date = serde_json::json!({
        "id": 1,
        "level": 1,
        "name": "typo",
        "startPlanned": "2025-13-01",
        "endPlanned": "2025-05-01"
    });
    assert!(serde_json::from_value::<Task>(bad_date).is_err());
}

#[test]
fn duration_is_kept_independent_of_dates() {
    let mut task = Task::form_default(1, date(2025, 6, 3));
    task.end_planned = date(2025, 6, 30);
    task.duration_days = 20;

    assert!(task.validate().is_ok());
    assert_eq!(task.planned_span_days(), 28);
    assert_eq!(task.duration_days, 20);
}
