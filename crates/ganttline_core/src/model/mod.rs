//! Schedule domain model.
//!
//! # Responsibility
//! - Define the task rows and quarter captions that make up a schedule.
//! - Define typed single-field edits used by editor sessions.
//!
//! # Invariants
//! - Every record is identified by a stable integer id.
//! - Records are replaced wholesale; edits only ever touch working copies.

pub mod edit;
pub mod quarter;
pub mod task;
