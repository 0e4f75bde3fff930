//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and activity history for
//! plain-text CLI output.

pub mod expense;

pub use expense::{format_expense_details, format_expense_list};

use crate::audit::AuditEntry;

/// Format activity-log entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No activity recorded.".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Expense, ExpenseId};
    use chrono::NaiveDate;

    #[test]
    fn test_format_history() {
        assert_eq!(format_history(&[]), "No activity recorded.");

        let tea = Expense {
            id: ExpenseId::from(3),
            title: "Tea".into(),
            amount: Amount::from_minor(1500),
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        let output = format_history(&[AuditEntry::create(&tea), AuditEntry::delete(&tea)]);

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("CREATE #3 (Tea)"));
        assert!(lines[1].ends_with("DELETE #3 (Tea)"));
    }
}
