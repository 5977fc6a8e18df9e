//! Schedule use-case service.
//!
//! # Responsibility
//! - Own the canonical task and quarter collections of one schedule.
//! - Accept whole-record mutations from editor surfaces.
//! - Project the current state for rendering.
//!
//! # Invariants
//! - Initial state is always injected; there is no built-in dataset.
//! - Every record entering the schedule passes validation.
//! - Removing a record clears any editor session holding it.

use crate::layout::projection::{project_schedule, QuarterMode, ScheduleLayout};
use crate::model::edit::{FieldParseError, TaskEdit, TaskField};
use crate::model::quarter::{Quarter, QuarterId, QuarterValidationError};
use crate::model::task::{Percent, Task, TaskId, TaskValidationError};
use crate::repo::collection::{Collection, RecordKind, RepoError};
use crate::service::bulk_editor::BulkEditor;
use crate::service::editor::{EditorError, ProgressEditor, TaskEditor};
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for schedule use-cases.
#[derive(Debug)]
pub enum ScheduleError {
    InvalidTask(TaskValidationError),
    InvalidQuarter(QuarterValidationError),
    Repo(RepoError),
    Editor(EditorError),
    /// Raw form input could not be parsed.
    Field(FieldParseError),
    /// Schedule document could not be decoded or encoded.
    Json(serde_json::Error),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTask(err) => write!(f, "invalid task: {err}"),
            Self::InvalidQuarter(err) => write!(f, "invalid quarter: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::Field(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid schedule document: {err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTask(err) => Some(err),
            Self::InvalidQuarter(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Editor(err) => Some(err),
            Self::Field(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for ScheduleError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

impl From<QuarterValidationError> for ScheduleError {
    fn from(value: QuarterValidationError) -> Self {
        Self::InvalidQuarter(value)
    }
}

impl From<RepoError> for ScheduleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<EditorError> for ScheduleError {
    fn from(value: EditorError) -> Self {
        match value {
            EditorError::Invalid(err) => Self::InvalidTask(err),
            other => Self::Editor(other),
        }
    }
}

impl From<FieldParseError> for ScheduleError {
    fn from(value: FieldParseError) -> Self {
        Self::Field(value)
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Wire shape of a schedule document.
#[derive(Debug, Serialize, Deserialize)]
struct ScheduleDocument {
    tasks: Vec<Task>,
    #[serde(default)]
    quarters: Vec<Quarter>,
}

/// Validated task and quarter collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    tasks: Collection<Task>,
    quarters: Collection<Quarter>,
}

impl Schedule {
    /// Builds a schedule, validating every record and id uniqueness.
    pub fn new(tasks: Vec<Task>, quarters: Vec<Quarter>) -> ScheduleResult<Self> {
        for task in &tasks {
            task.validate()?;
        }
        for quarter in &quarters {
            quarter.validate()?;
        }
        Ok(Self {
            tasks: Collection::from_records(tasks)?,
            quarters: Collection::from_records(quarters)?,
        })
    }

    /// Decodes a `{ "tasks": [...], "quarters": [...] }` document.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        let document: ScheduleDocument = serde_json::from_str(json)?;
        Self::new(document.tasks, document.quarters)
    }

    /// Encodes this schedule as a pretty-printed document.
    pub fn to_json(&self) -> ScheduleResult<String> {
        let document = ScheduleDocument {
            tasks: self.tasks.as_slice().to_vec(),
            quarters: self.quarters.as_slice().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn quarters(&self) -> &[Quarter] {
        self.quarters.as_slice()
    }

    pub(crate) fn task_collection(&self) -> &Collection<Task> {
        &self.tasks
    }

    pub(crate) fn quarter_collection(&self) -> &Collection<Quarter> {
        &self.quarters
    }

    pub(crate) fn from_collections(
        tasks: Collection<Task>,
        quarters: Collection<Quarter>,
    ) -> Self {
        Self { tasks, quarters }
    }
}

/// Schedule facade over in-memory collections and editor sessions.
#[derive(Debug, Clone, Default)]
pub struct ScheduleService {
    schedule: Schedule,
    task_editor: TaskEditor,
    progress_editor: ProgressEditor,
}

impl ScheduleService {
    /// Creates a service from injected initial state.
    pub fn new(schedule: Schedule) -> Self {
        info!(
            "event=schedule_load module=schedule status=ok tasks={} quarters={}",
            schedule.tasks.len(),
            schedule.quarters.len()
        );
        Self {
            schedule,
            task_editor: TaskEditor::default(),
            progress_editor: ProgressEditor::default(),
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn tasks(&self) -> &[Task] {
        self.schedule.tasks()
    }

    pub fn quarters(&self) -> &[Quarter] {
        self.schedule.quarters()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.schedule.tasks.get(id)
    }

    pub fn quarter(&self, id: QuarterId) -> Option<&Quarter> {
        self.schedule.quarters.get(id)
    }

    /// Appends a form-default task and returns its id.
    pub fn add_task(&mut self, today: NaiveDate) -> ScheduleResult<TaskId> {
        let id = self.schedule.tasks.next_id()?;
        self.schedule.tasks.insert(Task::form_default(id, today))?;
        info!("event=task_add module=schedule status=ok id={id}");
        Ok(id)
    }

    /// Appends a form-default quarter and returns its id.
    pub fn add_quarter(&mut self, today: NaiveDate) -> ScheduleResult<QuarterId> {
        let id = self.schedule.quarters.next_id()?;
        self.schedule
            .quarters
            .insert(Quarter::form_default(id, today))?;
        info!("event=quarter_add module=schedule status=ok id={id}");
        Ok(id)
    }

    /// Replaces one task wholesale by id.
    pub fn replace_task(&mut self, task: Task) -> ScheduleResult<()> {
        task.validate()?;
        let id = task.id;
        if let Err(err) = self.schedule.tasks.replace_by_id(task) {
            warn!("event=task_replace module=schedule status=error id={id} error={err}");
            return Err(err.into());
        }
        info!("event=task_replace module=schedule status=ok id={id}");
        Ok(())
    }

    /// Replaces one quarter wholesale by id.
    pub fn replace_quarter(&mut self, quarter: Quarter) -> ScheduleResult<()> {
        quarter.validate()?;
        let id = quarter.id;
        self.schedule.quarters.replace_by_id(quarter)?;
        info!("event=quarter_replace module=schedule status=ok id={id}");
        Ok(())
    }

    /// Removes one task and clears any editor session holding it.
    pub fn remove_task(&mut self, id: TaskId) -> ScheduleResult<Task> {
        let removed = self.schedule.tasks.remove_by_id(id)?;
        let cleared = self.task_editor.forget(id) | self.progress_editor.forget(id);
        info!("event=task_remove module=schedule status=ok id={id} editor_cleared={cleared}");
        Ok(removed)
    }

    pub fn remove_quarter(&mut self, id: QuarterId) -> ScheduleResult<Quarter> {
        let removed = self.schedule.quarters.remove_by_id(id)?;
        info!("event=quarter_remove module=schedule status=ok id={id}");
        Ok(removed)
    }

    pub fn task_editor(&self) -> &TaskEditor {
        &self.task_editor
    }

    pub fn progress_editor(&self) -> &ProgressEditor {
        &self.progress_editor
    }

    /// Opens the full-field editor on a clone of task `id`.
    pub fn open_task_editor(&mut self, id: TaskId) -> ScheduleResult<()> {
        let task = self.schedule.tasks.get(id).ok_or(RepoError::NotFound {
            kind: RecordKind::Task,
            id,
        })?;
        self.task_editor.open(task);
        Ok(())
    }

    pub fn edit_task(&mut self, edit: TaskEdit) -> ScheduleResult<()> {
        Ok(self.task_editor.apply(edit)?)
    }

    /// Parses raw form text for `field` and applies it to the open task editor.
    ///
    /// A malformed value leaves the working copy untouched.
    pub fn edit_task_field(&mut self, field: TaskField, input: &str) -> ScheduleResult<()> {
        let edit = TaskEdit::from_form(field, input)?;
        self.edit_task(edit)
    }

    /// Commits the full-field editor's working copy.
    pub fn save_task_editor(&mut self) -> ScheduleResult<TaskId> {
        let task = self.task_editor.save()?;
        let id = task.id;
        self.replace_task(task)?;
        Ok(id)
    }

    pub fn cancel_task_editor(&mut self) {
        self.task_editor.cancel();
    }

    /// Opens the progress-only editor on a clone of task `id`.
    pub fn open_progress_editor(&mut self, id: TaskId) -> ScheduleResult<()> {
        let task = self.schedule.tasks.get(id).ok_or(RepoError::NotFound {
            kind: RecordKind::Task,
            id,
        })?;
        self.progress_editor.open(task);
        Ok(())
    }

    pub fn set_progress(&mut self, percent: Percent) -> ScheduleResult<()> {
        Ok(self.progress_editor.set_percent(percent)?)
    }

    /// Commits the progress editor's working copy.
    pub fn save_progress_editor(&mut self) -> ScheduleResult<TaskId> {
        let task = self.progress_editor.save()?;
        let id = task.id;
        self.replace_task(task)?;
        Ok(id)
    }

    pub fn cancel_progress_editor(&mut self) {
        self.progress_editor.cancel();
    }

    /// Opens the list editor over clones of both collections.
    pub fn open_bulk_editor(&self) -> BulkEditor {
        BulkEditor::open(&self.schedule)
    }

    /// Replaces both collections with the list editor's working copies.
    ///
    /// Single-record editors holding ids that no longer exist are cleared.
    pub fn commit_bulk(&mut self, editor: BulkEditor) -> ScheduleResult<()> {
        let schedule = editor.finish()?;
        for editor_id in [
            self.task_editor.session().open_id(),
            self.progress_editor.session().open_id(),
        ]
        .into_iter()
        .flatten()
        {
            if schedule.tasks.get(editor_id).is_none() {
                self.task_editor.forget(editor_id);
                self.progress_editor.forget(editor_id);
            }
        }
        info!(
            "event=bulk_commit module=schedule status=ok tasks={} quarters={}",
            schedule.tasks.len(),
            schedule.quarters.len()
        );
        self.schedule = schedule;
        Ok(())
    }

    /// Projects the current schedule for rendering.
    pub fn layout(&self, mode: QuarterMode, today: NaiveDate) -> ScheduleLayout {
        project_schedule(self.tasks(), self.quarters(), mode, today)
    }
}
