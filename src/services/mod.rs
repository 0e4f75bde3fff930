//! Service layer for expense-cli
//!
//! The service layer sits between the API and the user-facing surfaces
//! (CLI and TUI): it owns the local expense list, enforces form
//! validation and confirmation, and keeps the list consistent with what
//! the server confirmed.

pub mod confirm;
pub mod expense_list;

#[cfg(test)]
pub(crate) mod fake;

pub use confirm::{Confirm, Confirmed, StdinConfirm};
pub use expense_list::{Deletion, ExpenseListController, PendingOp};
