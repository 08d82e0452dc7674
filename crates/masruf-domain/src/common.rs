//! Shared traits and numeric tolerances for ledger primitives.

use uuid::Uuid;

/// Exposes a stable identifier for entities stored in the book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Tolerance below which two amounts are treated as equal.
pub const AMOUNT_EPSILON: f64 = 1e-5;
