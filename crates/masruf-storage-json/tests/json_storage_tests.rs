use chrono::{TimeZone, Utc};
use masruf_core::storage::BookStorage;
use masruf_domain::{Book, Expense};
use masruf_storage_json::JsonBookStorage;
use tempfile::tempdir;

#[test]
fn json_storage_can_save_and_load_a_book() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");

    let mut book = Book::new("Corner Shop", 1_000_000.0);
    let date = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
    book.add_expense(Expense::new("Flour order", date, 50_000.0, true));

    storage.save_book(&book).expect("save book");
    let loaded = storage.load_book("Corner Shop").expect("load book");

    assert_eq!(loaded.name, "Corner Shop");
    assert_eq!(loaded.budget.current_budget, 1_000_000.0);
    assert_eq!(loaded.expenses, book.expenses);

    let path = storage.book_path("Corner Shop");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn book_names_are_slugged_on_disk() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");

    storage
        .save_book(&Book::new("My Corner Shop!", 0.0))
        .expect("save book");

    let path = storage.book_path("My Corner Shop!");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("my_corner_shop_.json")
    );
    assert_eq!(storage.list_books().expect("list"), vec!["my_corner_shop_"]);
}

#[test]
fn saving_twice_keeps_the_latest_contents() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");

    let mut book = Book::new("Shop", 1_000_000.0);
    storage.save_book(&book).expect("first save");

    book.budget.current_budget = 750_000.0;
    storage.save_book(&book).expect("second save");

    let loaded = storage.load_book("Shop").expect("load book");
    assert_eq!(loaded.budget.current_budget, 750_000.0);
    // No tmp leftovers after a clean save.
    let names = storage.list_books().expect("list");
    assert_eq!(names, vec!["shop"]);
}

#[test]
fn load_or_default_creates_a_fresh_book_when_missing() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");

    let book = storage
        .load_or_default("New Shop", 500_000.0)
        .expect("load or default");
    assert_eq!(book.budget.current_budget, 500_000.0);
    assert!(book.expenses.is_empty());
    // Nothing is written until the first save.
    assert!(!storage.book_exists("New Shop"));
}

#[test]
fn missing_books_load_as_not_found() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");
    assert!(storage.load_book("nowhere").is_err());
    assert!(!storage.book_exists("nowhere"));
}

#[test]
fn delete_book_removes_the_file() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(dir.path().join("books")).expect("create storage");

    storage.save_book(&Book::new("Shop", 0.0)).expect("save");
    assert!(storage.book_exists("Shop"));

    storage.delete_book("Shop").expect("delete");
    assert!(!storage.book_exists("Shop"));
    assert!(storage.list_books().expect("list").is_empty());
}
