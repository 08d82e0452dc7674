//! Expense categorisation for statistics and filtering.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Buckets a spend event for category reporting.
#[derive(Default)]
pub enum ExpenseCategory {
    Food,
    Supplies,
    Utilities,
    Salary,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Returns every category in display order.
    pub fn all() -> [ExpenseCategory; 5] {
        [
            ExpenseCategory::Food,
            ExpenseCategory::Supplies,
            ExpenseCategory::Utilities,
            ExpenseCategory::Salary,
            ExpenseCategory::Other,
        ]
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Supplies => "Supplies",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Salary => "Salary",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}
