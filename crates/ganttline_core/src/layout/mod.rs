//! Timeline layout: calendar math, view projection and display labels.
//!
//! # Responsibility
//! - Convert task date ranges into positions on a shared horizontal axis.
//! - Produce the per-render tuples and captions consumed by the view layer.
//!
//! # Invariants
//! - Layout never mutates schedule state.
//! - Layout never panics, including for dates outside the year window.

pub mod calendar;
pub mod format;
pub mod projection;
