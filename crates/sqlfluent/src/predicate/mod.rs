//! Predicates: atomic comparisons and AND/OR composition.
//!
//! Predicates are plain data until resolved against a statement's
//! [`Translator`](crate::Translator), so every field they mention is
//! qualified with the aliases bound in that statement.

mod comparator;
mod where_builder;

pub use comparator::{Compare, CompareWith, Comparator, Operand};
pub use where_builder::{WhereBuilder, WhereFactory};

/// Comparison operators.
pub mod op {
    pub const EQ: &str = "=";
    pub const NEQ: &str = "<>";
    pub const GT: &str = ">";
    pub const GTE: &str = ">=";
    pub const LT: &str = "<";
    pub const LTE: &str = "<=";
    pub const LIKE: &str = "LIKE";
    pub const IN: &str = "IN";
    pub const IS: &str = "IS";
}
