//! The aggregate root owning the budget, suppliers, and expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budget::Budget, common::NamedEntity, expense::Expense, range::DateRange, supplier::Supplier,
};

/// Owns every record the ledger operates on.
///
/// The budget is embedded rather than looked up, so exactly one exists per
/// book. All mutation funnels through the core engine; presentation code
/// never edits the budget ad hoc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub budget: Budget,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(name: impl Into<String>, initial_budget: f64) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            budget: Budget::new(initial_budget),
            suppliers: Vec::new(),
            expenses: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps the book as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn expense_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }

    pub fn supplier(&self, id: Uuid) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// Finds a supplier by name, ignoring case.
    pub fn supplier_by_name(&self, name: &str) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.matches_name(name))
    }

    /// Suppliers whose names contain `fragment`, ignoring case.
    pub fn suggest_suppliers(&self, fragment: &str) -> Vec<&Supplier> {
        let needle = fragment.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.suppliers
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Finds a supplier by name ignoring case, creating one when absent.
    /// Returns the id and whether a new supplier was created.
    pub fn resolve_supplier(&mut self, name: &str) -> (Uuid, bool) {
        if let Some(id) = self
            .suppliers
            .iter()
            .find(|s| s.matches_name(name))
            .map(|s| s.id)
        {
            return (id, false);
        }
        (self.add_supplier(Supplier::new(name)), true)
    }

    pub fn add_supplier(&mut self, supplier: Supplier) -> Uuid {
        let id = supplier.id;
        self.suppliers.push(supplier);
        self.touch();
        id
    }

    pub fn add_expense(&mut self, expense: Expense) -> Uuid {
        let id = expense.id;
        self.expenses.push(expense);
        self.touch();
        id
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == id)?;
        self.touch();
        Some(self.expenses.remove(index))
    }

    /// Removes a supplier, clearing the reference on any expense that
    /// pointed at it.
    pub fn remove_supplier(&mut self, id: Uuid) -> Option<Supplier> {
        let index = self.suppliers.iter().position(|s| s.id == id)?;
        for expense in self
            .expenses
            .iter_mut()
            .filter(|e| e.supplier_id == Some(id))
        {
            expense.supplier_id = None;
        }
        self.touch();
        Some(self.suppliers.remove(index))
    }

    /// Expenses dated inside `range`.
    pub fn expenses_in(&self, range: DateRange) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| range.contains(e.day()))
            .collect()
    }

    pub fn unpaid_expenses(&self) -> Vec<&Expense> {
        self.expenses.iter().filter(|e| !e.is_paid).collect()
    }

    pub fn unpaid_for_supplier(&self, supplier_id: Uuid) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| !e.is_paid && e.supplier_id == Some(supplier_id))
            .collect()
    }

    /// Free-text filter over details, supplier name, date, amount, and the
    /// `paid` / `unpaid` keywords. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.expenses.iter().collect();
        }
        let wants_unpaid = needle.contains("unpaid");
        let wants_paid = needle.contains("paid") && !wants_unpaid;
        self.expenses
            .iter()
            .filter(|expense| {
                let details_match = expense.details.to_lowercase().contains(&needle);
                let supplier_match = expense
                    .supplier_id
                    .and_then(|id| self.supplier(id))
                    .map(|s| s.name.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                let date_match = expense
                    .day()
                    .format("%Y-%m-%d")
                    .to_string()
                    .contains(&needle);
                let amount_match = format!("{:.2}", expense.amount).contains(&needle);
                let paid_match =
                    (wants_paid && expense.is_paid) || (wants_unpaid && !expense.is_paid);
                details_match || supplier_match || date_match || amount_match || paid_match
            })
            .collect()
    }
}

impl NamedEntity for Book {
    fn name(&self) -> &str {
        &self.name
    }
}
