//! Activity log for expense-cli
//!
//! Records every create, update and delete the server confirmed, with
//! before/after values, in an append-only JSONL file in the data directory.
//!
//! - `AuditEntry`: one confirmed operation on one expense.
//! - `AuditLogger`: appends entries and reads them back.
//! - `diff_expenses`: human-readable field changes for updates.

mod diff;
mod entry;
mod logger;

pub use diff::diff_expenses;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
