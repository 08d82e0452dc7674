//! Pure aggregation over expense collections: daily and weekly series,
//! category splits, and outstanding supplier debt.

use std::{cmp::Ordering, collections::HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use masruf_domain::{
    CategoryTotal, DailyTotal, DateRange, Expense, ExpenseCategory, Supplier, SupplierDebt,
};

/// Stateless reporting helpers. Every function is a pure function of its
/// inputs: no side effects, no storage access, deterministic for the same
/// expenses and parameters.
pub struct StatsService;

impl StatsService {
    /// Sums expenses per calendar day inside `range`, ascending by date.
    /// Days without expenses are omitted.
    pub fn daily_totals(expenses: &[Expense], range: DateRange) -> Vec<DailyTotal> {
        let by_day = Self::accumulate_by_day(expenses, range);
        let mut totals: Vec<DailyTotal> = by_day
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect();
        totals.sort_by_key(|entry| entry.date);
        totals
    }

    /// Sums expenses per calendar day inside `range`, one entry per day,
    /// zero for days without expenses.
    pub fn daily_totals_filled(expenses: &[Expense], range: DateRange) -> Vec<DailyTotal> {
        let by_day = Self::accumulate_by_day(expenses, range);
        range
            .days()
            .map(|date| DailyTotal {
                date,
                total: by_day.get(&date).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Seven entries, Monday first, for the week containing
    /// `reference + 7 * week_offset` days. Days without expenses carry a
    /// zero total.
    pub fn weekly_series(
        expenses: &[Expense],
        reference: NaiveDate,
        week_offset: i32,
    ) -> Vec<DailyTotal> {
        let shifted = reference + Duration::days(7 * week_offset as i64);
        let monday = shifted - Duration::days(shifted.weekday().num_days_from_monday() as i64);
        let range = DateRange {
            start: monday,
            end: monday + Duration::days(7),
        };
        Self::daily_totals_filled(expenses, range)
    }

    /// Totals per category, descending by total, with each category's share
    /// of the overall amount. Percentages are zero when nothing was spent.
    pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
        let grand_total: f64 = expenses.iter().map(|e| e.amount).sum();
        let mut by_category: HashMap<ExpenseCategory, f64> = HashMap::new();
        for expense in expenses {
            *by_category.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        let mut totals: Vec<CategoryTotal> = by_category
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category,
                total,
                percentage: if grand_total > 0.0 {
                    total / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect();
        totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        totals
    }

    /// Outstanding unpaid amount per supplier, descending. Suppliers with
    /// no unpaid expenses are absent from the result.
    pub fn supplier_debt(expenses: &[Expense], suppliers: &[Supplier]) -> Vec<SupplierDebt> {
        let mut by_supplier: HashMap<Uuid, f64> = HashMap::new();
        for expense in expenses.iter().filter(|e| !e.is_paid) {
            if let Some(supplier_id) = expense.supplier_id {
                *by_supplier.entry(supplier_id).or_insert(0.0) += expense.amount;
            }
        }
        let mut debts: Vec<SupplierDebt> = by_supplier
            .into_iter()
            .map(|(supplier_id, total)| SupplierDebt {
                supplier_id,
                name: suppliers
                    .iter()
                    .find(|s| s.id == supplier_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "Unknown Supplier".into()),
                total,
            })
            .collect();
        debts.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        debts
    }

    /// Total unpaid amount across all expenses, with or without a supplier.
    pub fn total_debt(expenses: &[Expense]) -> f64 {
        expenses
            .iter()
            .filter(|e| !e.is_paid)
            .map(|e| e.amount)
            .sum()
    }

    /// Amount paid out on `today`.
    pub fn daily_spent(expenses: &[Expense], today: NaiveDate) -> f64 {
        expenses
            .iter()
            .filter(|e| e.is_paid && e.day() == today)
            .map(|e| e.amount)
            .sum()
    }

    fn accumulate_by_day(expenses: &[Expense], range: DateRange) -> HashMap<NaiveDate, f64> {
        let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
        for expense in expenses.iter().filter(|e| range.contains(e.day())) {
            *by_day.entry(expense.day()).or_insert(0.0) += expense.amount;
        }
        by_day
    }
}
