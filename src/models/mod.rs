//! Core data models for expense-cli
//!
//! This module contains the data structures exchanged with the expense API
//! and the form state used to build them.

pub mod amount;
pub mod expense;
pub mod ids;

pub use amount::{Amount, AmountParseError};
pub use expense::{DraftField, Expense, ExpenseDraft, ExpenseFields, DATE_FORMAT};
pub use ids::ExpenseId;
