//! The running budget record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::Identifiable;

/// Tracks the remaining spendable funds for a book.
///
/// Exactly one budget exists per book; it is owned by the aggregate and only
/// mutated through the ledger engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub current_budget: f64,
    /// Calendar day of the most recent daily top-up, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_top_up: Option<NaiveDate>,
}

impl Budget {
    pub fn new(current_budget: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            current_budget,
            last_top_up: None,
        }
    }

    /// Returns `true` when a top-up was already applied on `day`.
    pub fn topped_up_on(&self, day: NaiveDate) -> bool {
        self.last_top_up == Some(day)
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}
