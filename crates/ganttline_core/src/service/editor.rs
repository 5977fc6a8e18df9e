//! Single-record editor sessions.
//!
//! # Responsibility
//! - Hold a cloned working copy of one record while an editor surface is open.
//! - Gate which field edits each editor variant accepts.
//!
//! # Invariants
//! - The canonical record is never touched until the owner commits the value
//!   returned by `save`.
//! - Opening a record while another is open replaces the working copy.
//! - `save` validates first; an invalid working copy stays open.
//! - `forget(id)` clears the session when its record is deleted.

use crate::model::edit::TaskEdit;
use crate::model::task::{Percent, Task, TaskValidationError};
use crate::repo::collection::{Record, RecordId};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Editor session errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// An edit or save arrived while no record was open.
    NotOpen,
    /// The progress-only editor received a non-progress edit.
    EditNotAllowed,
    /// The working copy failed validation on save.
    Invalid(TaskValidationError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "no record is open in this editor"),
            Self::EditNotAllowed => write!(f, "edit not allowed in the progress editor"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for EditorError {
    fn from(value: TaskValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// `closed -> open(working) -> closed` state machine over one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession<T: Record> {
    working: Option<T>,
}

impl<T: Record> Default for EditorSession<T> {
    fn default() -> Self {
        Self { working: None }
    }
}

impl<T: Record> EditorSession<T> {
    /// Opens `record`, replacing any working copy outright.
    pub fn open(&mut self, record: &T) {
        if let Some(previous) = self.open_id() {
            debug!(
                "event=editor_replace module=editor kind={} previous_id={} id={}",
                T::KIND,
                previous,
                record.id()
            );
        }
        self.working = Some(record.clone());
    }

    pub fn is_open(&self) -> bool {
        self.working.is_some()
    }

    pub fn open_id(&self) -> Option<RecordId> {
        self.working.as_ref().map(Record::id)
    }

    pub fn working(&self) -> Option<&T> {
        self.working.as_ref()
    }

    /// Mutates the working copy.
    pub fn modify(&mut self, update: impl FnOnce(&mut T)) -> Result<(), EditorError> {
        let working = self.working.as_mut().ok_or(EditorError::NotOpen)?;
        update(working);
        Ok(())
    }

    /// Closes the session and returns the working copy for commit.
    pub fn take(&mut self) -> Result<T, EditorError> {
        self.working.take().ok_or(EditorError::NotOpen)
    }

    /// Closes the session, discarding the working copy.
    pub fn cancel(&mut self) {
        if let Some(id) = self.open_id() {
            debug!(
                "event=editor_cancel module=editor kind={} id={}",
                T::KIND,
                id
            );
        }
        self.working = None;
    }

    /// Clears the session if it holds record `id`.
    ///
    /// Returns whether a working copy was discarded.
    pub fn forget(&mut self, id: RecordId) -> bool {
        if self.open_id() == Some(id) {
            self.working = None;
            return true;
        }
        false
    }
}

/// Full-field task editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditor {
    session: EditorSession<Task>,
}

impl TaskEditor {
    pub fn session(&self) -> &EditorSession<Task> {
        &self.session
    }

    pub fn open(&mut self, task: &Task) {
        self.session.open(task);
    }

    pub fn apply(&mut self, edit: TaskEdit) -> Result<(), EditorError> {
        self.session.modify(|task| task.apply(edit))
    }

    /// Validates and returns the working copy, closing the session.
    pub fn save(&mut self) -> Result<Task, EditorError> {
        validate_working(&self.session)?;
        self.session.take()
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn forget(&mut self, id: RecordId) -> bool {
        self.session.forget(id)
    }
}

/// Progress-only task editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressEditor {
    session: EditorSession<Task>,
}

impl ProgressEditor {
    pub fn session(&self) -> &EditorSession<Task> {
        &self.session
    }

    pub fn open(&mut self, task: &Task) {
        self.session.open(task);
    }

    pub fn set_percent(&mut self, percent: Percent) -> Result<(), EditorError> {
        self.apply(TaskEdit::Percent(percent))
    }

    /// Applies `edit` only if it is a progress change.
    pub fn apply(&mut self, edit: TaskEdit) -> Result<(), EditorError> {
        if !edit.is_progress() {
            return Err(EditorError::EditNotAllowed);
        }
        self.session.modify(|task| task.apply(edit))
    }

    /// Working-copy progress, or `None` when closed.
    pub fn percent(&self) -> Option<Percent> {
        self.session.working().map(Task::progress)
    }

    pub fn save(&mut self) -> Result<Task, EditorError> {
        validate_working(&self.session)?;
        self.session.take()
    }

    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    pub fn forget(&mut self, id: RecordId) -> bool {
        self.session.forget(id)
    }
}

fn validate_working(session: &EditorSession<Task>) -> Result<(), EditorError> {
    let working = session.working().ok_or(EditorError::NotOpen)?;
    working.validate()?;
    Ok(())
}
