//! masruf-domain
//!
//! Pure domain models (Book, Budget, Expense, Supplier, derived report rows).
//! No I/O, no services, no storage. Only data types and core enums.

pub mod book;
pub mod budget;
pub mod category;
pub mod common;
pub mod expense;
pub mod range;
pub mod report;
pub mod supplier;

pub use book::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use expense::*;
pub use range::*;
pub use report::*;
pub use supplier::*;
