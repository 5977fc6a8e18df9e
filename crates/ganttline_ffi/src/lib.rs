//! Flutter-facing bindings for the ganttline schedule view.

pub mod api;
