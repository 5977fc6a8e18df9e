use chrono::NaiveDate;
use ganttline_core::model::edit::{parse_count_or_zero, parse_date, parse_percent};
use ganttline_core::{
    EditorError, Percent, QuarterEdit, RecordKind, RepoError, Schedule, ScheduleError,
    ScheduleService, TaskEdit, TaskLevel,
};

const FIXTURE: &str = include_str!("fixtures/schedule.json");

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> ScheduleService {
    ScheduleService::new(Schedule::from_json(FIXTURE).unwrap())
}

#[test]
fn duplicate_ids_are_rejected_on_load() {
    let json = r#"{
        "tasks": [
            {"id": 1, "level": 1, "name": "a", "startPlanned": "2025-01-01", "endPlanned": "2025-01-02"},
            {"id": 1, "level": 2, "name": "b", "startPlanned": "2025-01-01", "endPlanned": "2025-01-02"}
        ]
    }"#;
    let err = Schedule::from_json(json).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Repo(RepoError::DuplicateId {
            kind: RecordKind::Task,
            id: 1
        })
    ));
}

#[test]
fn quarters_are_optional_in_documents() {
    let json = r#"{"tasks": []}"#;
    let schedule = Schedule::from_json(json).unwrap();
    assert!(schedule.quarters().is_empty());
}

#[test]
fn document_roundtrip_preserves_records() {
    let schedule = Schedule::from_json(FIXTURE).unwrap();
    let encoded = schedule.to_json().unwrap();
    let decoded = Schedule::from_json(&encoded).unwrap();
    assert_eq!(decoded, schedule);
}

#[test]
fn replace_then_lookup_returns_replacement() {
    let mut service = service();
    let mut replacement = service.task(3).unwrap().clone();
    replacement.name = "Protótipo revisado".to_string();
    replacement.level = TaskLevel::Subtask;

    service.replace_task(replacement.clone()).unwrap();
    assert_eq!(service.task(3), Some(&replacement));
    assert_eq!(service.tasks()[2], replacement);
}

#[test]
fn replace_missing_id_leaves_schedule_untouched() {
    let mut service = service();
    let before = service.schedule().clone();
    let mut ghost = service.task(1).unwrap().clone();
    ghost.id = 99;

    let err = service.replace_task(ghost).unwrap_err();
    assert!(matches!(
        err,
        ScheduleError::Repo(RepoError::NotFound { id: 99, .. })
    ));
    assert_eq!(service.schedule(), &before);
}

#[test]
fn task_editor_commits_only_on_save() {
    let mut service = service();
    service.open_task_editor(5).unwrap();
    service
        .edit_task(TaskEdit::Name("Testes de aceitação".to_string()))
        .unwrap();
    service
        .edit_task(TaskEdit::StartActual(Some(date(2025, 7, 3))))
        .unwrap();

    assert_eq!(service.task(5).unwrap().name, "Testes com usuários");

    service.save_task_editor().unwrap();
    let saved = service.task(5).unwrap();
    assert_eq!(saved.name, "Testes de aceitação");
    assert_eq!(saved.start_actual, Some(date(2025, 7, 3)));
    assert!(!service.task_editor().session().is_open());
}

#[test]
fn cancel_discards_working_copy() {
    let mut service = service();
    let before = service.schedule().clone();

    service.open_task_editor(2).unwrap();
    service.edit_task(TaskEdit::Checked(false)).unwrap();
    service.cancel_task_editor();

    assert_eq!(service.schedule(), &before);
    assert_eq!(
        service.edit_task(TaskEdit::Checked(true)).unwrap_err().to_string(),
        EditorError::NotOpen.to_string()
    );
}

#[test]
fn invalid_working_copy_is_not_committed() {
    let mut service = service();
    service.open_task_editor(4).unwrap();
    service
        .edit_task(TaskEdit::EndPlanned(date(2025, 5, 1)))
        .unwrap();

    assert!(matches!(
        service.save_task_editor(),
        Err(ScheduleError::InvalidTask(_))
    ));
    assert_eq!(service.task(4).unwrap().end_planned, date(2025, 6, 30));
    assert!(service.task_editor().session().is_open());
}

#[test]
fn progress_editor_is_independent_of_task_editor() {
    let mut service = service();
    service.open_task_editor(4).unwrap();
    service.open_progress_editor(4).unwrap();

    service.set_progress(parse_percent("75")).unwrap();
    service.save_progress_editor().unwrap();

    assert_eq!(service.task(4).unwrap().percent, Some(Percent::saturating(75)));
    assert!(service.task_editor().session().is_open());
    assert_eq!(
        service.task_editor().session().working().unwrap().percent,
        Some(Percent::saturating(50))
    );
}

#[test]
fn deleting_open_record_clears_editors() {
    let mut service = service();
    service.open_task_editor(6).unwrap();
    service.open_progress_editor(6).unwrap();

    service.remove_task(6).unwrap();

    assert!(service.task_editor().session().working().is_none());
    assert!(service.progress_editor().session().working().is_none());
    assert!(service.task(6).is_none());
}

#[test]
fn add_after_delete_never_reuses_a_live_id() {
    let mut service = service();
    service.remove_task(3).unwrap();
    let id = service.add_task(date(2025, 8, 1)).unwrap();
    assert_eq!(id, 7);

    let new_task = service.task(id).unwrap();
    assert_eq!(new_task.name, "Nova Tarefa");
    assert_eq!(new_task.start_planned, date(2025, 8, 1));
}

#[test]
fn bulk_editor_commits_both_collections() {
    let mut service = service();
    let mut editor = service.open_bulk_editor();

    let new_id = editor.add_task(date(2025, 9, 1)).unwrap();
    editor
        .update_task(new_id, TaskEdit::DurationDays(parse_count_or_zero("abc")))
        .unwrap();
    editor
        .update_task(new_id, TaskEdit::EndPlanned(parse_date("2025-09-12").unwrap()))
        .unwrap();
    editor
        .update_quarter(2, QuarterEdit::Name("Construção e testes".to_string()))
        .unwrap();
    editor.delete_quarter(4).unwrap();

    // untouched until commit
    assert!(service.task(new_id).is_none());

    service.commit_bulk(editor).unwrap();

    let added = service.task(new_id).unwrap();
    assert_eq!(added.duration_days, 0);
    assert_eq!(added.end_planned, date(2025, 9, 12));
    assert_eq!(service.quarter(2).unwrap().name, "Construção e testes");
    assert!(service.quarter(4).is_none());
}

#[test]
fn dropping_bulk_editor_discards_changes() {
    let service = service();
    let before = service.schedule().clone();
    {
        let mut editor = service.open_bulk_editor();
        editor.delete_task(1).unwrap();
        editor.add_quarter(date(2025, 1, 1)).unwrap();
    }
    assert_eq!(service.schedule(), &before);
}

#[test]
fn bulk_commit_clears_editor_of_deleted_task() {
    let mut service = service();
    service.open_task_editor(2).unwrap();

    let mut editor = service.open_bulk_editor();
    editor.delete_task(2).unwrap();
    service.commit_bulk(editor).unwrap();

    assert!(!service.task_editor().session().is_open());
}
