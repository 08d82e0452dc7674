use std::{collections::HashSet, sync::Mutex};

use masruf_domain::Book;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing books.
///
/// The contract the engine relies on: a write is durable once `save_book`
/// returns Ok, and reads reflect every prior acknowledged write from the
/// same process.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, book: &Book) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<Book, CoreError>;
    fn book_exists(&self, name: &str) -> bool;
}

/// In-process storage used by tests and embedding frontends.
#[derive(Default)]
pub struct MemoryBookStorage {
    books: Mutex<Vec<Book>>,
}

impl MemoryBookStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookStorage for MemoryBookStorage {
    fn save_book(&self, book: &Book) -> Result<(), CoreError> {
        let mut books = self
            .books
            .lock()
            .map_err(|_| CoreError::Storage("storage mutex poisoned".into()))?;
        if let Some(existing) = books.iter_mut().find(|b| b.name == book.name) {
            *existing = book.clone();
        } else {
            books.push(book.clone());
        }
        Ok(())
    }

    fn load_book(&self, name: &str) -> Result<Book, CoreError> {
        let books = self
            .books
            .lock()
            .map_err(|_| CoreError::Storage("storage mutex poisoned".into()))?;
        books
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| CoreError::BookNotFound(name.to_string()))
    }

    fn book_exists(&self, name: &str) -> bool {
        self.books
            .lock()
            .map(|books| books.iter().any(|b| b.name == name))
            .unwrap_or(false)
    }
}

/// Detects dangling supplier references within a book snapshot.
pub fn book_warnings(book: &Book) -> Vec<String> {
    let supplier_ids: HashSet<_> = book.suppliers.iter().map(|s| s.id).collect();
    let mut warnings = Vec::new();
    for expense in &book.expenses {
        if let Some(supplier_id) = expense.supplier_id {
            if !supplier_ids.contains(&supplier_id) {
                warnings.push(format!(
                    "expense {} references unknown supplier {}",
                    expense.id, supplier_id
                ));
            }
        }
    }
    warnings
}
