//! The mutation engine keeping the budget and the expense collection
//! consistent across create, edit, delete, undo, and top-up operations.
//!
//! Single-writer: every mutation goes through `&mut LedgerEngine`, which
//! owns the book. Each operation applies its in-memory change, persists the
//! whole book, and rolls the change back when the write is not acknowledged,
//! so memory never runs ahead of durable state.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use masruf_domain::{
    normalize_supplier_name, Book, DeletedExpense, Expense, ExpenseCategory, AMOUNT_EPSILON,
};

use crate::{
    error::Result, stats_service::StatsService, storage::BookStorage, time::Clock, CoreError,
};

/// Input for a new expense.
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub details: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub is_paid: bool,
    pub category: ExpenseCategory,
    /// Falls back to the engine's configured currency when absent.
    pub currency: Option<String>,
    pub supplier_name: String,
    pub photo: Option<Vec<u8>>,
}

impl ExpenseDraft {
    pub fn new(
        supplier_name: impl Into<String>,
        amount: f64,
        date: DateTime<Utc>,
        is_paid: bool,
    ) -> Self {
        Self {
            details: String::new(),
            date,
            amount,
            is_paid,
            category: ExpenseCategory::default(),
            currency: None,
            supplier_name: supplier_name.into(),
            photo: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }
}

/// Field edits applied to an existing expense. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct ExpenseEdit {
    pub details: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub amount: Option<f64>,
    pub category: Option<ExpenseCategory>,
    pub photo: Option<Option<Vec<u8>>>,
}

/// Tunable amounts, usually sourced from configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub initial_budget: f64,
    pub daily_top_up: f64,
    pub currency: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            initial_budget: 1_000_000.0,
            daily_top_up: 1_000_000.0,
            currency: "IQD".into(),
        }
    }
}

/// Owns the book and funnels every mutation through a single writer.
pub struct LedgerEngine {
    book: Book,
    storage: Box<dyn BookStorage>,
    clock: Box<dyn Clock>,
    settings: EngineSettings,
    undo_stack: Vec<DeletedExpense>,
    top_up_notice: bool,
}

impl LedgerEngine {
    /// Loads `name` from storage, or creates a book with the configured
    /// initial budget when none exists yet. A missing budget is a
    /// recoverable state, never a fatal one.
    pub fn open(
        name: &str,
        storage: Box<dyn BookStorage>,
        clock: Box<dyn Clock>,
        settings: EngineSettings,
    ) -> Result<Self> {
        let book = if storage.book_exists(name) {
            storage.load_book(name)?
        } else {
            let book = Book::new(name, settings.initial_budget);
            storage.save_book(&book)?;
            book
        };
        Ok(Self {
            book,
            storage,
            clock,
            settings,
            undo_stack: Vec::new(),
            top_up_notice: false,
        })
    }

    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn current_budget(&self) -> f64 {
        self.book.budget.current_budget
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.book.expenses
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.book.expense(id)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn undo_available(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn top_up_notice(&self) -> bool {
        self.top_up_notice
    }

    /// Clears the transient top-up notice. Dismissal timing belongs to the
    /// presentation layer; the engine only owns the flag.
    pub fn dismiss_top_up_notice(&mut self) {
        self.top_up_notice = false;
    }

    pub fn search(&self, query: &str) -> Vec<&Expense> {
        self.book.search(query)
    }

    /// Amount paid out on the current calendar day.
    pub fn daily_spent(&self) -> f64 {
        StatsService::daily_spent(&self.book.expenses, self.clock.today())
    }

    /// Validates the draft, resolves the supplier case-insensitively
    /// (reusing or creating), debits the budget when the expense is already
    /// paid, and persists everything as one write.
    pub fn create_expense(&mut self, draft: ExpenseDraft) -> Result<Uuid> {
        let supplier_name = normalize_supplier_name(&draft.supplier_name)
            .map_err(|err| CoreError::validation("supplier_name", err.to_string()))?;
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::validation(
                "amount",
                "amount must be a positive number",
            ));
        }

        let budget_before = self.book.budget.current_budget;
        let (supplier_id, supplier_created) = self.book.resolve_supplier(&supplier_name);

        let mut expense = Expense::new(draft.details, draft.date, draft.amount, draft.is_paid)
            .with_category(draft.category)
            .with_currency(
                draft
                    .currency
                    .unwrap_or_else(|| self.settings.currency.clone()),
            )
            .with_supplier(supplier_id);
        if let Some(photo) = draft.photo {
            expense = expense.with_photo(photo);
        }
        let expense_id = expense.id;

        if draft.is_paid {
            self.book.budget.current_budget -= draft.amount;
        }
        self.book.add_expense(expense);

        if let Err(err) = self.persist() {
            self.book.remove_expense(expense_id);
            if supplier_created {
                self.book.remove_supplier(supplier_id);
            }
            self.book.budget.current_budget = budget_before;
            return Err(err);
        }
        Ok(expense_id)
    }

    /// Applies field edits. An amount change only moves the budget when the
    /// expense is paid; an unpaid expense never debited it in the first
    /// place.
    pub fn edit_expense(&mut self, id: Uuid, edit: ExpenseEdit) -> Result<()> {
        let new_amount = edit.amount;
        if let Some(amount) = new_amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(CoreError::validation(
                    "amount",
                    "amount must be a positive number",
                ));
            }
        }

        let before = self
            .book
            .expense(id)
            .cloned()
            .ok_or(CoreError::ExpenseNotFound(id))?;
        let budget_before = self.book.budget.current_budget;

        {
            let expense = self
                .book
                .expense_mut(id)
                .ok_or(CoreError::ExpenseNotFound(id))?;
            if let Some(details) = edit.details {
                expense.details = details;
            }
            if let Some(date) = edit.date {
                expense.date = date;
            }
            if let Some(amount) = new_amount {
                expense.amount = amount;
            }
            if let Some(category) = edit.category {
                expense.category = category;
            }
            if let Some(photo) = edit.photo {
                expense.photo = photo;
            }
        }

        if let Some(amount) = new_amount {
            let delta = amount - before.amount;
            if delta.abs() > AMOUNT_EPSILON && before.is_paid {
                self.book.budget.current_budget -= delta;
            }
        }

        if let Err(err) = self.persist() {
            if let Some(expense) = self.book.expense_mut(id) {
                *expense = before;
            }
            self.book.budget.current_budget = budget_before;
            return Err(err);
        }
        Ok(())
    }

    /// Marks an expense paid and debits the budget. Idempotent: an expense
    /// that is already paid is left alone and nothing is debited. Returns
    /// whether a transition happened.
    pub fn mark_paid(&mut self, id: Uuid) -> Result<bool> {
        let (amount, already_paid) = {
            let expense = self.book.expense(id).ok_or(CoreError::ExpenseNotFound(id))?;
            (expense.amount, expense.is_paid)
        };
        if already_paid {
            return Ok(false);
        }

        let budget_before = self.book.budget.current_budget;
        if let Some(expense) = self.book.expense_mut(id) {
            expense.is_paid = true;
        }
        self.book.budget.current_budget -= amount;

        if let Err(err) = self.persist() {
            if let Some(expense) = self.book.expense_mut(id) {
                expense.is_paid = false;
            }
            self.book.budget.current_budget = budget_before;
            return Err(err);
        }
        Ok(true)
    }

    /// Refunds the budget when the expense was paid, removes the expense,
    /// and pushes an undo snapshot carrying the pre-refund budget value.
    pub fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        let budget_before = self.book.budget.current_budget;
        let expense = self
            .book
            .remove_expense(id)
            .ok_or(CoreError::ExpenseNotFound(id))?;
        let was_paid = expense.is_paid;
        if was_paid {
            self.book.budget.current_budget += expense.amount;
        }
        let record = DeletedExpense {
            expense,
            was_paid,
            budget_before_delete: budget_before,
        };

        if let Err(err) = self.persist() {
            self.book.budget.current_budget = budget_before;
            self.book.add_expense(record.expense);
            return Err(err);
        }
        self.undo_stack.push(record);
        Ok(())
    }

    /// Restores the most recently deleted expense; a no-op when nothing was
    /// deleted. A delete that refunded the budget restores the exact
    /// pre-delete balance, overwriting any budget change made since.
    pub fn undo_last_delete(&mut self) -> Result<Option<Uuid>> {
        let record = match self.undo_stack.pop() {
            Some(record) => record,
            None => return Ok(None),
        };
        let budget_before = self.book.budget.current_budget;
        if record.was_paid {
            self.book.budget.current_budget = record.budget_before_delete;
        }
        let expense_id = record.expense.id;
        self.book.add_expense(record.expense.clone());

        if let Err(err) = self.persist() {
            self.book.remove_expense(expense_id);
            self.book.budget.current_budget = budget_before;
            self.undo_stack.push(record);
            return Err(err);
        }
        Ok(Some(expense_id))
    }

    /// Adds the configured daily amount at most once per calendar day and
    /// raises the top-up notice. Returns whether a top-up was applied.
    pub fn top_up_daily(&mut self) -> Result<bool> {
        let today = self.clock.today();
        if self.book.budget.topped_up_on(today) {
            return Ok(false);
        }

        let budget_before = self.book.budget.current_budget;
        let last_top_up_before = self.book.budget.last_top_up;
        self.book.budget.current_budget += self.settings.daily_top_up;
        self.book.budget.last_top_up = Some(today);

        if let Err(err) = self.persist() {
            self.book.budget.current_budget = budget_before;
            self.book.budget.last_top_up = last_top_up_before;
            return Err(err);
        }
        self.top_up_notice = true;
        info!(amount = self.settings.daily_top_up, "applied daily top-up");
        Ok(true)
    }

    /// Removes a supplier, clearing the reference on its expenses.
    pub fn remove_supplier(&mut self, id: Uuid) -> Result<()> {
        if self.book.supplier(id).is_none() {
            return Err(CoreError::SupplierNotFound(id));
        }
        let before = self.book.clone();
        self.book.remove_supplier(id);
        if let Err(err) = self.persist() {
            self.book = before;
            return Err(err);
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.book.touch();
        self.storage.save_book(&self.book).map_err(|err| {
            warn!("book write failed, rolling back in-memory state: {err}");
            err
        })
    }
}
