use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use chrono::{DateTime, Duration, TimeZone, Utc};

use masruf_domain::{Book, Expense, ExpenseCategory};

use crate::{
    book_warnings, BookStorage, Clock, CoreError, EngineSettings, ExpenseDraft, ExpenseEdit,
    FixedClock, LedgerEngine, MemoryBookStorage,
};

fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

fn engine_at(now: DateTime<Utc>) -> LedgerEngine {
    LedgerEngine::open(
        "test-book",
        Box::new(MemoryBookStorage::new()),
        Box::new(FixedClock(now)),
        EngineSettings::default(),
    )
    .expect("open engine")
}

fn engine() -> LedgerEngine {
    engine_at(noon(2025, 6, 2))
}

/// Clock whose instant can be moved forward mid-test.
#[derive(Clone)]
struct SteppingClock(Arc<Mutex<DateTime<Utc>>>);

impl SteppingClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(now)))
    }

    fn advance_days(&self, days: i64) {
        let mut now = self.0.lock().unwrap();
        *now += Duration::days(days);
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Storage double whose writes can be failed on demand.
struct FlakyStorage {
    inner: MemoryBookStorage,
    fail: Arc<AtomicBool>,
}

impl BookStorage for FlakyStorage {
    fn save_book(&self, book: &Book) -> Result<(), CoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::Storage("disk unavailable".into()));
        }
        self.inner.save_book(book)
    }

    fn load_book(&self, name: &str) -> Result<Book, CoreError> {
        self.inner.load_book(name)
    }

    fn book_exists(&self, name: &str) -> bool {
        self.inner.book_exists(name)
    }
}

#[test]
fn open_creates_book_with_initial_budget() {
    let engine = engine();
    assert_eq!(engine.current_budget(), 1_000_000.0);
    assert!(engine.expenses().is_empty());
    assert!(!engine.undo_available());
}

#[test]
fn paid_expense_debits_budget_at_creation() {
    let mut engine = engine();
    engine
        .create_expense(ExpenseDraft::new("Baghdad Mill", 50_000.0, noon(2025, 6, 2), true))
        .expect("create expense");
    assert_eq!(engine.current_budget(), 950_000.0);
}

#[test]
fn unpaid_expense_leaves_budget_alone() {
    let mut engine = engine();
    engine
        .create_expense(ExpenseDraft::new("Water Works", 30_000.0, noon(2025, 6, 2), false))
        .expect("create expense");
    assert_eq!(engine.current_budget(), 1_000_000.0);
}

#[test]
fn blank_supplier_name_is_rejected_without_side_effects() {
    let mut engine = engine();
    let err = engine
        .create_expense(ExpenseDraft::new("   ", 10_000.0, noon(2025, 6, 2), true))
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation {
            field: "supplier_name",
            ..
        }
    ));
    assert!(engine.expenses().is_empty());
    assert!(engine.book().suppliers.is_empty());
    assert_eq!(engine.current_budget(), 1_000_000.0);
}

#[test]
fn non_positive_amount_is_rejected() {
    let mut engine = engine();
    for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = engine
            .create_expense(ExpenseDraft::new("Grocer", amount, noon(2025, 6, 2), true))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "amount", .. }));
    }
    assert!(engine.expenses().is_empty());
}

#[test]
fn supplier_names_are_reused_case_insensitively() {
    let mut engine = engine();
    engine
        .create_expense(ExpenseDraft::new("Al Noor Bakery", 5_000.0, noon(2025, 6, 2), false))
        .expect("first expense");
    engine
        .create_expense(ExpenseDraft::new("  al noor bakery ", 7_000.0, noon(2025, 6, 3), false))
        .expect("second expense");
    assert_eq!(engine.book().suppliers.len(), 1);
    assert_eq!(engine.expenses().len(), 2);
}

#[test]
fn mark_paid_debits_once_and_is_idempotent() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 20_000.0, noon(2025, 6, 2), false))
        .expect("create expense");

    assert!(engine.mark_paid(id).expect("first mark"));
    assert_eq!(engine.current_budget(), 980_000.0);

    assert!(!engine.mark_paid(id).expect("second mark"));
    assert_eq!(engine.current_budget(), 980_000.0);
}

#[test]
fn delete_then_undo_restores_expense_and_budget() {
    let mut engine = engine();
    let id = engine
        .create_expense(
            ExpenseDraft::new("Baghdad Mill", 50_000.0, noon(2025, 6, 2), true)
                .with_details("Flour order")
                .with_category(ExpenseCategory::Supplies),
        )
        .expect("create expense");
    assert_eq!(engine.current_budget(), 950_000.0);
    let snapshot: Expense = engine.expense(id).cloned().expect("expense exists");

    engine.delete_expense(id).expect("delete expense");
    assert_eq!(engine.current_budget(), 1_000_000.0);
    assert!(engine.undo_available());
    assert!(engine.expense(id).is_none());

    let restored = engine.undo_last_delete().expect("undo");
    assert_eq!(restored, Some(id));
    assert_eq!(engine.current_budget(), 950_000.0);
    assert_eq!(engine.expense(id), Some(&snapshot));
    assert!(!engine.undo_available());
}

#[test]
fn deleting_an_unpaid_expense_does_not_refund() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Water Works", 30_000.0, noon(2025, 6, 2), false))
        .expect("create expense");
    engine.delete_expense(id).expect("delete expense");
    assert_eq!(engine.current_budget(), 1_000_000.0);

    engine.undo_last_delete().expect("undo");
    assert_eq!(engine.current_budget(), 1_000_000.0);
}

#[test]
fn undo_on_empty_stack_is_a_silent_no_op() {
    let mut engine = engine();
    assert_eq!(engine.undo_last_delete().expect("undo"), None);
    assert_eq!(engine.current_budget(), 1_000_000.0);
}

#[test]
fn deletes_undo_in_lifo_order() {
    let mut engine = engine();
    let first = engine
        .create_expense(ExpenseDraft::new("Grocer", 10_000.0, noon(2025, 6, 2), true))
        .expect("first");
    let second = engine
        .create_expense(ExpenseDraft::new("Bakery", 20_000.0, noon(2025, 6, 2), true))
        .expect("second");

    engine.delete_expense(first).expect("delete first");
    engine.delete_expense(second).expect("delete second");

    assert_eq!(engine.undo_last_delete().expect("undo"), Some(second));
    assert_eq!(engine.undo_last_delete().expect("undo"), Some(first));
    assert_eq!(engine.undo_last_delete().expect("undo"), None);
}

#[test]
fn edit_amount_on_paid_expense_moves_budget_by_delta() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 40_000.0, noon(2025, 6, 2), true))
        .expect("create expense");
    assert_eq!(engine.current_budget(), 960_000.0);

    engine
        .edit_expense(
            id,
            ExpenseEdit {
                amount: Some(55_000.0),
                ..ExpenseEdit::default()
            },
        )
        .expect("edit expense");
    assert_eq!(engine.current_budget(), 945_000.0);
    assert_eq!(engine.expense(id).unwrap().amount, 55_000.0);
}

#[test]
fn edit_amount_on_unpaid_expense_leaves_budget_alone() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 40_000.0, noon(2025, 6, 2), false))
        .expect("create expense");

    engine
        .edit_expense(
            id,
            ExpenseEdit {
                amount: Some(55_000.0),
                ..ExpenseEdit::default()
            },
        )
        .expect("edit expense");
    assert_eq!(engine.current_budget(), 1_000_000.0);
    assert_eq!(engine.expense(id).unwrap().amount, 55_000.0);
}

#[test]
fn tiny_amount_changes_are_ignored_by_the_budget() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 40_000.0, noon(2025, 6, 2), true))
        .expect("create expense");

    engine
        .edit_expense(
            id,
            ExpenseEdit {
                amount: Some(40_000.000001),
                ..ExpenseEdit::default()
            },
        )
        .expect("edit expense");
    assert_eq!(engine.current_budget(), 960_000.0);
}

#[test]
fn top_up_applies_once_per_calendar_day() {
    let clock = SteppingClock::new(noon(2025, 6, 2));
    let mut engine = LedgerEngine::open(
        "test-book",
        Box::new(MemoryBookStorage::new()),
        Box::new(clock.clone()),
        EngineSettings::default(),
    )
    .expect("open engine");

    assert!(engine.top_up_daily().expect("first top-up"));
    assert_eq!(engine.current_budget(), 2_000_000.0);
    assert!(engine.top_up_notice());

    engine.dismiss_top_up_notice();
    assert!(!engine.top_up_daily().expect("same-day top-up"));
    assert_eq!(engine.current_budget(), 2_000_000.0);
    assert!(!engine.top_up_notice());

    clock.advance_days(1);
    assert!(engine.top_up_daily().expect("next-day top-up"));
    assert_eq!(engine.current_budget(), 3_000_000.0);
}

#[test]
fn failed_write_rolls_back_a_create() {
    let fail = Arc::new(AtomicBool::new(false));
    let storage = FlakyStorage {
        inner: MemoryBookStorage::new(),
        fail: fail.clone(),
    };
    let mut engine = LedgerEngine::open(
        "test-book",
        Box::new(storage),
        Box::new(FixedClock(noon(2025, 6, 2))),
        EngineSettings::default(),
    )
    .expect("open engine");

    fail.store(true, Ordering::SeqCst);
    let err = engine
        .create_expense(ExpenseDraft::new("Grocer", 25_000.0, noon(2025, 6, 2), true))
        .unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)));
    assert_eq!(engine.current_budget(), 1_000_000.0);
    assert!(engine.expenses().is_empty());
    assert!(engine.book().suppliers.is_empty());
}

#[test]
fn failed_write_rolls_back_mark_paid_and_delete() {
    let fail = Arc::new(AtomicBool::new(false));
    let storage = FlakyStorage {
        inner: MemoryBookStorage::new(),
        fail: fail.clone(),
    };
    let mut engine = LedgerEngine::open(
        "test-book",
        Box::new(storage),
        Box::new(FixedClock(noon(2025, 6, 2))),
        EngineSettings::default(),
    )
    .expect("open engine");
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 25_000.0, noon(2025, 6, 2), false))
        .expect("create expense");

    fail.store(true, Ordering::SeqCst);
    assert!(engine.mark_paid(id).is_err());
    assert!(!engine.expense(id).unwrap().is_paid);
    assert_eq!(engine.current_budget(), 1_000_000.0);

    assert!(engine.delete_expense(id).is_err());
    assert!(engine.expense(id).is_some());
    assert!(!engine.undo_available());

    fail.store(false, Ordering::SeqCst);
    assert!(engine.mark_paid(id).expect("mark after recovery"));
    assert_eq!(engine.current_budget(), 975_000.0);
}

#[test]
fn budget_tracks_paid_existing_expenses_across_a_sequence() {
    let clock = SteppingClock::new(noon(2025, 6, 2));
    let mut engine = LedgerEngine::open(
        "test-book",
        Box::new(MemoryBookStorage::new()),
        Box::new(clock.clone()),
        EngineSettings::default(),
    )
    .expect("open engine");
    let initial = engine.current_budget();
    let mut top_ups = 0.0;

    let a = engine
        .create_expense(ExpenseDraft::new("Grocer", 10_000.0, noon(2025, 6, 2), true))
        .expect("a");
    let b = engine
        .create_expense(ExpenseDraft::new("Bakery", 20_000.0, noon(2025, 6, 2), false))
        .expect("b");
    engine.mark_paid(b).expect("pay b");
    engine.mark_paid(b).expect("pay b again");
    engine.delete_expense(a).expect("delete a");
    engine.top_up_daily().expect("top-up");
    top_ups += engine.settings().daily_top_up;
    clock.advance_days(1);
    engine.top_up_daily().expect("top-up next day");
    top_ups += engine.settings().daily_top_up;

    let paid_existing: f64 = engine
        .expenses()
        .iter()
        .filter(|e| e.is_paid)
        .map(|e| e.amount)
        .sum();
    assert_eq!(
        engine.current_budget(),
        initial - paid_existing + top_ups
    );
}

#[test]
fn removing_a_supplier_clears_expense_references() {
    let mut engine = engine();
    let id = engine
        .create_expense(ExpenseDraft::new("Grocer", 10_000.0, noon(2025, 6, 2), false))
        .expect("create expense");
    let supplier_id = engine.expense(id).unwrap().supplier_id.expect("supplier set");

    engine.remove_supplier(supplier_id).expect("remove supplier");
    assert!(engine.expense(id).unwrap().supplier_id.is_none());
    assert!(engine.book().suppliers.is_empty());
}

#[test]
fn book_warnings_reports_dangling_supplier_references() {
    let mut book = Book::new("warnings", 0.0);
    let mut expense = Expense::new("Orphan", noon(2025, 6, 2), 1_000.0, false);
    expense.supplier_id = Some(uuid::Uuid::new_v4());
    book.add_expense(expense);

    let warnings = book_warnings(&book);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unknown supplier"));
}
