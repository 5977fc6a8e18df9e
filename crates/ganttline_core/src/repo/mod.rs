//! In-memory record storage.
//!
//! # Responsibility
//! - Own the id-keyed collections behind a schedule.
//! - Return semantic errors (`NotFound`, `DuplicateId`) instead of silently
//!   masking lookup misses.
//!
//! # Invariants
//! - Storage is process-local; nothing is persisted.

pub mod collection;
