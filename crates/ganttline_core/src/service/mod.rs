//! Schedule use-case services.
//!
//! # Responsibility
//! - Orchestrate collection mutations into editor-driven use-cases.
//! - Keep view/FFI layers decoupled from collection details.

pub mod bulk_editor;
pub mod editor;
pub mod schedule_service;
