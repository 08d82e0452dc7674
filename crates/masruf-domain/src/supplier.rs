//! Suppliers billed by expenses.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A named counterparty that expenses are billed against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
}

impl Supplier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Returns `true` when `candidate` names this supplier, ignoring case.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.to_lowercase() == candidate.to_lowercase()
    }
}

impl Identifiable for Supplier {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Supplier {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Supplier {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}

/// Validates a user-typed supplier name: trimmed, non-empty, letters and
/// whitespace only.
pub fn normalize_supplier_name(raw: &str) -> Result<String, SupplierNameError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SupplierNameError::Empty);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace())
    {
        return Err(SupplierNameError::InvalidCharacters);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors raised while validating a supplier name.
pub enum SupplierNameError {
    Empty,
    InvalidCharacters,
}

impl fmt::Display for SupplierNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplierNameError::Empty => f.write_str("supplier name must not be empty"),
            SupplierNameError::InvalidCharacters => {
                f.write_str("supplier name may only contain letters and spaces")
            }
        }
    }
}

impl std::error::Error for SupplierNameError {}
