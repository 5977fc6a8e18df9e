//! Id-keyed ordered record collections.
//!
//! # Responsibility
//! - Provide the whole-record mutation primitives shared by tasks and quarters.
//! - Keep display order stable across replace operations.
//!
//! # Invariants
//! - Ids are unique within a collection; inserts with a taken id are rejected.
//! - `replace_by_id` keeps the record at its original position.
//! - A lookup miss leaves the collection untouched and reports `NotFound`.

use crate::model::quarter::Quarter;
use crate::model::task::Task;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Integer identity shared by every schedule record kind.
pub type RecordId = u32;

pub type RepoResult<T> = Result<T, RepoError>;

/// Record kind label used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Task,
    Quarter,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Task => write!(f, "task"),
            Self::Quarter => write!(f, "quarter"),
        }
    }
}

/// Collection-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound { kind: RecordKind, id: RecordId },
    DuplicateId { kind: RecordKind, id: RecordId },
    /// The largest id is already `RecordId::MAX`.
    IdExhausted { kind: RecordKind },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id: {id}"),
            Self::IdExhausted { kind } => write!(f, "no {kind} id left after {}", RecordId::MAX),
        }
    }
}

impl Error for RepoError {}

/// A record addressable by a stable integer id.
pub trait Record: Clone {
    const KIND: RecordKind;

    fn id(&self) -> RecordId;
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> RecordId {
        self.id
    }
}

impl Record for Quarter {
    const KIND: RecordKind = RecordKind::Quarter;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Returns `max(existing ids, default 0) + 1`.
///
/// Fails with `IdExhausted` when the largest id is `RecordId::MAX`.
pub fn next_id<T: Record>(records: &[T]) -> RepoResult<RecordId> {
    records
        .iter()
        .map(Record::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(RepoError::IdExhausted { kind: T::KIND })
}

/// Ordered, id-unique record list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T: Record> {
    records: Vec<T>,
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Builds a collection, rejecting duplicate ids.
    pub fn from_records(records: Vec<T>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(RepoError::DuplicateId {
                    kind: T::KIND,
                    id: record.id(),
                });
            }
        }
        Ok(Self { records })
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn next_id(&self) -> RepoResult<RecordId> {
        next_id(&self.records)
    }

    /// Appends a record at the end of the display order.
    pub fn insert(&mut self, record: T) -> RepoResult<()> {
        if self.contains(record.id()) {
            return Err(RepoError::DuplicateId {
                kind: T::KIND,
                id: record.id(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Replaces the record whose id matches `record.id()` wholesale.
    pub fn replace_by_id(&mut self, record: T) -> RepoResult<()> {
        let id = record.id();
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepoError::NotFound { kind: T::KIND, id }),
        }
    }

    /// Mutates the record with `id` in place through `update`.
    pub fn update_by_id(&mut self, id: RecordId, update: impl FnOnce(&mut T)) -> RepoResult<()> {
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                update(slot);
                Ok(())
            }
            None => Err(RepoError::NotFound { kind: T::KIND, id }),
        }
    }

    /// Removes and returns the record with `id`.
    pub fn remove_by_id(&mut self, id: RecordId) -> RepoResult<T> {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => Ok(self.records.remove(index)),
            None => Err(RepoError::NotFound { kind: T::KIND, id }),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.records
    }
}

impl<'a, T: Record> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{next_id, Collection, RecordKind, RepoError};
    use crate::model::quarter::Quarter;
    use crate::model::task::Task;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid test date")
    }

    fn tasks(ids: &[u32]) -> Vec<Task> {
        ids.iter().map(|id| Task::form_default(*id, today())).collect()
    }

    #[test]
    fn next_id_defaults_to_one_and_follows_max() {
        assert_eq!(next_id::<Task>(&[]), Ok(1));
        assert_eq!(next_id(&tasks(&[1, 5, 3])), Ok(6));
    }

    #[test]
    fn next_id_reports_exhausted_ids() {
        let collection = Collection::from_records(tasks(&[3, u32::MAX])).unwrap();
        assert_eq!(
            collection.next_id(),
            Err(RepoError::IdExhausted {
                kind: RecordKind::Task
            })
        );
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let err = Collection::from_records(tasks(&[1, 2, 1])).unwrap_err();
        assert_eq!(
            err,
            RepoError::DuplicateId {
                kind: RecordKind::Task,
                id: 1
            }
        );
    }

    #[test]
    fn replace_keeps_position_and_misses_leave_state_untouched() {
        let mut collection = Collection::from_records(tasks(&[1, 2, 3])).unwrap();
        let mut replacement = Task::form_default(2, today());
        replacement.name = "Renamed".to_string();

        collection.replace_by_id(replacement.clone()).unwrap();
        assert_eq!(collection.as_slice()[1], replacement);

        let before = collection.clone();
        let err = collection
            .replace_by_id(Task::form_default(42, today()))
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::NotFound {
                kind: RecordKind::Task,
                id: 42
            }
        );
        assert_eq!(collection, before);
    }

    #[test]
    fn remove_returns_record() {
        let mut collection =
            Collection::from_records(vec![Quarter::form_default(7, today())]).unwrap();
        let removed = collection.remove_by_id(7).unwrap();
        assert_eq!(removed.id, 7);
        assert!(collection.is_empty());
        assert!(collection.remove_by_id(7).is_err());
    }
}
