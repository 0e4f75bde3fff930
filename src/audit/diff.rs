//! Field diffs between two versions of an expense

use crate::models::{DraftField, Expense, ExpenseDraft};

/// Describe which fields changed, in form order
///
/// Returns `None` when nothing changed.
pub fn diff_expenses(before: &Expense, after: &Expense) -> Option<String> {
    let before_form = ExpenseDraft::from_expense(before);
    let after_form = ExpenseDraft::from_expense(after);

    let changes: Vec<String> = DraftField::ALL
        .iter()
        .filter(|field| before_form.get(**field) != after_form.get(**field))
        .map(|field| {
            format!(
                "{}: {} -> {}",
                field.name(),
                format_value(*field, before_form.get(*field)),
                format_value(*field, after_form.get(*field))
            )
        })
        .collect();

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

/// Quote text fields, truncating long ones
fn format_value(field: DraftField, value: &str) -> String {
    match field {
        DraftField::Title | DraftField::Category => {
            if value.chars().count() > 50 {
                let head: String = value.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", value)
            }
        }
        DraftField::Amount | DraftField::Date => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, ExpenseId};
    use chrono::NaiveDate;

    fn lunch() -> Expense {
        Expense {
            id: ExpenseId::from(1),
            title: "Lunch".into(),
            amount: Amount::from_minor(20000),
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_no_changes() {
        assert!(diff_expenses(&lunch(), &lunch()).is_none());
    }

    #[test]
    fn test_multiple_changes_in_form_order() {
        let mut after = lunch();
        after.date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        after.amount = Amount::from_minor(25050);

        let diff = diff_expenses(&lunch(), &after).unwrap();
        assert_eq!(diff, "amount: 200.00 -> 250.50, date: 2024-01-01 -> 2024-01-05");
    }

    #[test]
    fn test_long_title_truncation() {
        let mut after = lunch();
        after.title = "x".repeat(80);

        let diff = diff_expenses(&lunch(), &after).unwrap();
        assert!(diff.starts_with("title: \"Lunch\" -> \"xxx"));
        assert!(diff.ends_with("...\""));
    }
}
