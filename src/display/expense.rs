//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use crate::config::settings::Settings;
use crate::models::Expense;

/// Format a list of expenses as a table
///
/// Columns follow the dashboard: Title, Amount, Date, Category, preceded by
/// the id so rows can be addressed from the command line.
pub fn format_expense_list(expenses: &[Expense], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let amount_header = if settings.currency_label.is_empty() {
        "Amount".to_string()
    } else {
        format!("Amount ({})", settings.currency_label)
    };

    let rows: Vec<[String; 5]> = expenses
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.title.clone(),
                e.amount.to_string(),
                settings.format_date(e.date),
                e.category.clone(),
            ]
        })
        .collect();

    let header = [
        "ID".to_string(),
        "Title".to_string(),
        amount_header,
        "Date".to_string(),
        "Category".to_string(),
    ];

    // Calculate column widths
    let mut widths = header.each_ref().map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    push_row(&mut output, &header, &widths);

    // Separator line
    let separator = widths.map(|w| "-".repeat(w));
    push_row(&mut output, &separator, &widths);

    for row in &rows {
        push_row(&mut output, row, &widths);
    }

    output.push_str(&format!("\n{} expense(s)\n", expenses.len()));
    output
}

/// Amount is right-aligned, everything else left-aligned
fn push_row(output: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = format!(
        "{:<w0$}  {:<w1$}  {:>w2$}  {:<w3$}  {}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        cells[4],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    output.push_str(line.trim_end());
    output.push('\n');
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!(
        "  Amount:   {}\n",
        expense.amount.format_with_label(&settings.currency_label)
    ));
    output.push_str(&format!("  Category: {}\n", expense.category));
    output.push_str(&format!(
        "  Date:     {}\n",
        settings.format_date(expense.date)
    ));

    output
}
