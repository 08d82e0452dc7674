//! Expense records and the undo snapshot taken on deletion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::ExpenseCategory, common::*};

/// A single spend event, optionally billed against a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub details: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub is_paid: bool,
    pub category: ExpenseCategory,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,
    /// Weak reference: the supplier is looked up by id and may be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
}

impl Expense {
    pub fn new(
        details: impl Into<String>,
        date: DateTime<Utc>,
        amount: f64,
        is_paid: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            details: details.into(),
            date,
            amount,
            is_paid,
            category: ExpenseCategory::default(),
            currency: "IQD".into(),
            photo: None,
            supplier_id: None,
        }
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_supplier(mut self, supplier_id: Uuid) -> Self {
        self.supplier_id = Some(supplier_id);
        self
    }

    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }

    /// Calendar day the expense falls on.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Expense {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!(
            "exp:{} [{}]",
            self.id,
            if self.is_paid { "Paid" } else { "Unpaid" }
        )
    }
}

/// Snapshot of a deleted expense eligible for single-level restoration.
///
/// Ephemeral: lives on the in-memory undo stack only and is never persisted.
#[derive(Debug, Clone)]
pub struct DeletedExpense {
    pub expense: Expense,
    pub was_paid: bool,
    /// Budget value captured before any refund was applied.
    pub budget_before_delete: f64,
}
