//! Stable, public-facing helpers that wrap the engine and the aggregation
//! services.
//!
//! This module exposes a simplified API that frontends (GUI, FFI) can rely
//! on without depending on the entire service surface area.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use masruf_domain::{
    CategoryTotal, DailyTotal, DateRange, Expense, ExpenseCategory, Supplier, SupplierDebt,
};

use crate::{
    error::Result,
    ledger_engine::{EngineSettings, ExpenseDraft, LedgerEngine},
    stats_service::StatsService,
    storage::BookStorage,
    time::Clock,
};

/// Snapshot of the dashboard numbers a frontend renders.
#[derive(Debug, Clone)]
pub struct ApiDashboard {
    pub current_budget: f64,
    pub daily_spent: f64,
    pub total_debt: f64,
    pub expense_count: usize,
    pub undo_available: bool,
    pub top_up_notice: bool,
}

/// Opens (or creates) a book and returns the engine owning it.
pub fn api_open_engine(
    name: &str,
    storage: Box<dyn BookStorage>,
    clock: Box<dyn Clock>,
    settings: EngineSettings,
) -> Result<LedgerEngine> {
    LedgerEngine::open(name, storage, clock, settings)
}

/// Logs a new expense and returns its identifier.
#[allow(clippy::too_many_arguments)]
pub fn api_log_expense(
    engine: &mut LedgerEngine,
    supplier_name: &str,
    details: &str,
    date: DateTime<Utc>,
    amount: f64,
    is_paid: bool,
    category: ExpenseCategory,
) -> Result<Uuid> {
    engine.create_expense(
        ExpenseDraft::new(supplier_name, amount, date, is_paid)
            .with_details(details)
            .with_category(category),
    )
}

/// Marks the expense paid; returns whether a transition happened.
pub fn api_mark_paid(engine: &mut LedgerEngine, expense_id: Uuid) -> Result<bool> {
    engine.mark_paid(expense_id)
}

pub fn api_delete_expense(engine: &mut LedgerEngine, expense_id: Uuid) -> Result<()> {
    engine.delete_expense(expense_id)
}

/// Restores the most recently deleted expense, if any.
pub fn api_undo_last_delete(engine: &mut LedgerEngine) -> Result<Option<Uuid>> {
    engine.undo_last_delete()
}

/// Applies the daily top-up when one has not run today.
pub fn api_top_up_daily(engine: &mut LedgerEngine) -> Result<bool> {
    engine.top_up_daily()
}

/// Gathers the numbers the dashboard renders after any state change.
pub fn api_dashboard(engine: &LedgerEngine) -> ApiDashboard {
    ApiDashboard {
        current_budget: engine.current_budget(),
        daily_spent: engine.daily_spent(),
        total_debt: StatsService::total_debt(engine.expenses()),
        expense_count: engine.expenses().len(),
        undo_available: engine.undo_available(),
        top_up_notice: engine.top_up_notice(),
    }
}

/// Daily totals for an explicit reporting window.
pub fn api_daily_totals(engine: &LedgerEngine, range: DateRange) -> Vec<DailyTotal> {
    StatsService::daily_totals(engine.expenses(), range)
}

/// Expenses dated inside `range`, for filtered list screens.
pub fn api_expenses_in(engine: &LedgerEngine, range: DateRange) -> Vec<Expense> {
    engine
        .book()
        .expenses_in(range)
        .into_iter()
        .cloned()
        .collect()
}

/// Every unpaid expense, the debt report's list source.
pub fn api_unpaid_expenses(engine: &LedgerEngine) -> Vec<Expense> {
    engine
        .book()
        .unpaid_expenses()
        .into_iter()
        .cloned()
        .collect()
}

/// Unpaid expenses owed to one supplier, for the debt detail screen.
pub fn api_supplier_unpaid(engine: &LedgerEngine, supplier_id: Uuid) -> Vec<Expense> {
    engine
        .book()
        .unpaid_for_supplier(supplier_id)
        .into_iter()
        .cloned()
        .collect()
}

/// Suppliers whose names contain `fragment`, for typeahead suggestions.
pub fn api_suggest_suppliers(engine: &LedgerEngine, fragment: &str) -> Vec<Supplier> {
    engine
        .book()
        .suggest_suppliers(fragment)
        .into_iter()
        .cloned()
        .collect()
}

/// The current week's spend series, Monday first.
pub fn api_weekly_series(engine: &LedgerEngine, week_offset: i32) -> Vec<DailyTotal> {
    StatsService::weekly_series(engine.expenses(), engine.today(), week_offset)
}

pub fn api_category_totals(engine: &LedgerEngine) -> Vec<CategoryTotal> {
    StatsService::category_totals(engine.expenses())
}

pub fn api_supplier_debt(engine: &LedgerEngine) -> Vec<SupplierDebt> {
    StatsService::supplier_debt(engine.expenses(), &engine.book().suppliers)
}
