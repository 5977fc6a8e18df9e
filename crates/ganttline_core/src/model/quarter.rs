//! Quarter caption model.
//!
//! # Responsibility
//! - Hold the labeled sub-ranges shown in the timeline header.
//!
//! # Invariants
//! - `id` is unique within its collection.
//! - Dates feed tooltips only; they are not checked against tasks, against
//!   other quarters, or against each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a quarter caption.
pub type QuarterId = u32;

/// Placeholder name given to quarters created by an add action.
pub const NEW_QUARTER_NAME: &str = "Novo Trimestre";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarterValidationError {
    EmptyName,
}

impl Display for QuarterValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "quarter name must not be blank"),
        }
    }
}

impl Error for QuarterValidationError {}

/// Header caption over an arbitrary date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quarter {
    pub id: QuarterId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Quarter {
    /// Creates a quarter with the form-default shape used by add actions.
    pub fn form_default(id: QuarterId, today: NaiveDate) -> Self {
        Self {
            id,
            name: NEW_QUARTER_NAME.to_string(),
            start_date: today,
            end_date: today,
        }
    }

    pub fn validate(&self) -> Result<(), QuarterValidationError> {
        if self.name.trim().is_empty() {
            return Err(QuarterValidationError::EmptyName);
        }
        Ok(())
    }
}
