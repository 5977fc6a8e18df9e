//! List editor over both schedule collections.
//!
//! # Responsibility
//! - Edit, add and delete tasks and quarters against cloned working copies.
//! - Track which task card and which quarter card are expanded.
//!
//! # Invariants
//! - The canonical schedule is untouched until `finish` output is committed.
//!   Dropping the editor is the cancel path.
//! - New records take `next_id` of the working copy and become selected.
//! - Deleting the selected record clears the selection.

use crate::model::edit::{QuarterEdit, TaskEdit};
use crate::model::quarter::{Quarter, QuarterId};
use crate::model::task::{Task, TaskId};
use crate::repo::collection::{Collection, Record, RecordId, RepoError, RepoResult};
use crate::service::schedule_service::{Schedule, ScheduleResult};
use chrono::NaiveDate;
use log::debug;

/// Working state of the list editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEditor {
    tasks: Collection<Task>,
    quarters: Collection<Quarter>,
    selected_task: Option<TaskId>,
    selected_quarter: Option<QuarterId>,
}

impl BulkEditor {
    /// Opens the editor over clones of `schedule`'s collections.
    pub fn open(schedule: &Schedule) -> Self {
        Self {
            tasks: schedule.task_collection().clone(),
            quarters: schedule.quarter_collection().clone(),
            selected_task: None,
            selected_quarter: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.as_slice()
    }

    pub fn quarters(&self) -> &[Quarter] {
        self.quarters.as_slice()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task.and_then(|id| self.tasks.get(id))
    }

    pub fn selected_quarter(&self) -> Option<&Quarter> {
        self.selected_quarter.and_then(|id| self.quarters.get(id))
    }

    /// Appends a form-default task and selects it.
    pub fn add_task(&mut self, today: NaiveDate) -> RepoResult<TaskId> {
        let id = self.tasks.next_id()?;
        self.tasks.insert(Task::form_default(id, today))?;
        self.selected_task = Some(id);
        debug!("event=bulk_task_add module=bulk_editor id={id}");
        Ok(id)
    }

    /// Appends a form-default quarter and selects it.
    pub fn add_quarter(&mut self, today: NaiveDate) -> RepoResult<QuarterId> {
        let id = self.quarters.next_id()?;
        self.quarters.insert(Quarter::form_default(id, today))?;
        self.selected_quarter = Some(id);
        debug!("event=bulk_quarter_add module=bulk_editor id={id}");
        Ok(id)
    }

    pub fn update_task(&mut self, id: TaskId, edit: TaskEdit) -> RepoResult<()> {
        self.tasks.update_by_id(id, |task| task.apply(edit))
    }

    pub fn update_quarter(&mut self, id: QuarterId, edit: QuarterEdit) -> RepoResult<()> {
        self.quarters.update_by_id(id, |quarter| quarter.apply(edit))
    }

    /// Deletes a task, clearing the selection if it pointed at it.
    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<Task> {
        let removed = self.tasks.remove_by_id(id)?;
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        Ok(removed)
    }

    /// Deletes a quarter, clearing the selection if it pointed at it.
    pub fn delete_quarter(&mut self, id: QuarterId) -> RepoResult<Quarter> {
        let removed = self.quarters.remove_by_id(id)?;
        if self.selected_quarter == Some(id) {
            self.selected_quarter = None;
        }
        Ok(removed)
    }

    /// Expands task `id`, or collapses it if it is already expanded.
    pub fn toggle_task_selection(&mut self, id: TaskId) -> RepoResult<()> {
        ensure_present(&self.tasks, id)?;
        self.selected_task = if self.selected_task == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    /// Expands quarter `id`, or collapses it if it is already expanded.
    pub fn toggle_quarter_selection(&mut self, id: QuarterId) -> RepoResult<()> {
        ensure_present(&self.quarters, id)?;
        self.selected_quarter = if self.selected_quarter == Some(id) {
            None
        } else {
            Some(id)
        };
        Ok(())
    }

    /// Validates every working record and yields the schedule to commit.
    pub fn finish(self) -> ScheduleResult<Schedule> {
        for task in self.tasks.iter() {
            task.validate()?;
        }
        for quarter in self.quarters.iter() {
            quarter.validate()?;
        }
        Ok(Schedule::from_collections(self.tasks, self.quarters))
    }
}

fn ensure_present<T: Record>(collection: &Collection<T>, id: RecordId) -> RepoResult<()> {
    if collection.contains(id) {
        Ok(())
    } else {
        Err(RepoError::NotFound { kind: T::KIND, id })
    }
}

#[cfg(test)]
mod tests {
    use super::BulkEditor;
    use crate::model::edit::{QuarterEdit, TaskEdit};
    use crate::model::quarter::Quarter;
    use crate::model::task::Task;
    use crate::service::schedule_service::Schedule;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 9).unwrap()
    }

    fn schedule() -> Schedule {
        Schedule::new(
            vec![Task::form_default(1, today()), Task::form_default(2, today())],
            vec![Quarter::form_default(1, today())],
        )
        .unwrap()
    }

    #[test]
    fn add_selects_new_record() {
        let mut editor = BulkEditor::open(&schedule());
        let id = editor.add_task(today()).unwrap();
        assert_eq!(id, 3);
        assert_eq!(editor.selected_task().map(|task| task.id), Some(3));

        let quarter_id = editor.add_quarter(today()).unwrap();
        assert_eq!(quarter_id, 2);
        assert_eq!(editor.selected_quarter().map(|q| q.id), Some(2));
    }

    #[test]
    fn deleting_selected_task_clears_selection() {
        let mut editor = BulkEditor::open(&schedule());
        editor.toggle_task_selection(2).unwrap();
        editor.delete_task(2).unwrap();
        assert!(editor.selected_task().is_none());
        assert_eq!(editor.tasks().len(), 1);
    }

    #[test]
    fn toggling_twice_collapses() {
        let mut editor = BulkEditor::open(&schedule());
        editor.toggle_quarter_selection(1).unwrap();
        editor.toggle_quarter_selection(1).unwrap();
        assert!(editor.selected_quarter().is_none());
        assert!(editor.toggle_quarter_selection(99).is_err());
    }

    #[test]
    fn finish_rejects_invalid_working_copy() {
        let mut editor = BulkEditor::open(&schedule());
        editor
            .update_task(1, TaskEdit::Name(String::new()))
            .unwrap();
        editor
            .update_quarter(1, QuarterEdit::Name("Q1".to_string()))
            .unwrap();
        assert!(editor.finish().is_err());
    }
}
