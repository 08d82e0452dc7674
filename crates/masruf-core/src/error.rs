use std::io;

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for engine, aggregation, and storage layers.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("Expense not found: {0}")]
    ExpenseNotFound(Uuid),
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),
    #[error("Book not found: {0}")]
    BookNotFound(String),
    #[error("No budget record available")]
    BudgetMissing,
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Convenience constructor for field-level validation failures.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
