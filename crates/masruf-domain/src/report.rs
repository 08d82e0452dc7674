//! Derived, read-only report rows computed from the expense collection.
//!
//! Always recomputed from the current expenses; never cached or persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::ExpenseCategory;

/// Total spend for a single calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Total and share of overall spend for one category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
    pub percentage: f64,
}

/// Outstanding unpaid amount owed to one supplier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupplierDebt {
    pub supplier_id: Uuid,
    pub name: String,
    pub total: f64,
}
