//! Audit entry data structures
//!
//! One entry per confirmed mutation of an expense, holding the record as it
//! was before and after the server accepted the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::diff_expenses;
use crate::models::{Expense, ExpenseId};

/// Types of operations that are recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the server confirmed the operation (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    pub expense_id: ExpenseId,

    /// Title at the time of the operation
    pub title: String,

    /// Record before the operation (updates and deletes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Expense>,

    /// Record after the operation (creates and updates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Expense>,

    /// Human-readable field changes for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Entry for a created expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            expense_id: expense.id.clone(),
            title: expense.title.clone(),
            before: None,
            after: Some(expense.clone()),
            diff_summary: None,
        }
    }

    /// Entry for an updated expense, with the field diff filled in
    pub fn update(before: &Expense, after: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            expense_id: after.id.clone(),
            title: after.title.clone(),
            before: Some(before.clone()),
            after: Some(after.clone()),
            diff_summary: diff_expenses(before, after),
        }
    }

    /// Entry for a deleted expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Delete,
            expense_id: expense.id.clone(),
            title: expense.title.clone(),
            before: Some(expense.clone()),
            after: None,
            diff_summary: None,
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} #{} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id,
            self.title
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use chrono::NaiveDate;

    fn bus() -> Expense {
        Expense {
            id: ExpenseId::from(2),
            title: "Bus".into(),
            amount: Amount::from_minor(5000),
            category: "Transport".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_update_entry_has_diff() {
        let before = bus();
        let mut after = bus();
        after.title = "Bus Pass".into();

        let entry = AuditEntry::update(&before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.title, "Bus Pass");
        assert_eq!(
            entry.diff_summary.as_deref(),
            Some("title: \"Bus\" -> \"Bus Pass\"")
        );
    }

    #[test]
    fn test_create_and_delete_entries() {
        let created = AuditEntry::create(&bus());
        assert!(created.before.is_none());
        assert_eq!(created.after, Some(bus()));

        let deleted = AuditEntry::delete(&bus());
        assert_eq!(deleted.before, Some(bus()));
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::create(&bus());
        let text = entry.format_human_readable();
        assert!(text.contains("CREATE #2 (Bus)"));
        assert!(!text.contains("Changes"));
    }

    #[test]
    fn test_serialization() {
        let entry = AuditEntry::delete(&bus());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"after\""));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back.operation, Operation::Delete);
        assert_eq!(back.expense_id, ExpenseId::from(2));
    }
}
