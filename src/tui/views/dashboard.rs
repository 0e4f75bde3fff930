//! Expense dashboard view
//!
//! Header plus the expense table (Title, Amount, Date, Category).

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::ExpenseApi;
use crate::tui::app::App;

/// Render the title bar
pub fn render_header<A: ExpenseApi>(frame: &mut Frame, app: &App<'_, A>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let account = app.account.as_deref().unwrap_or("not signed in");
    let line = Line::from(vec![
        Span::styled(
            " Expense Tracker ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(account.to_string(), Style::default().fg(Color::White)),
        Span::raw(" │ "),
        Span::styled(
            "a:Add  e:Edit  d:Delete  r:Reload",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Render the expense table
pub fn render<A: ExpenseApi>(frame: &mut Frame, app: &App<'_, A>, area: Rect) {
    let block = Block::default()
        .title(" Expenses ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let expenses = app.controller.expenses();

    if expenses.is_empty() {
        let text = Paragraph::new("No expenses yet. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Min(20),    // Title
        Constraint::Length(14), // Amount
        Constraint::Length(12), // Date
        Constraint::Length(18), // Category
    ];

    let amount_header = format!("Amount ({})", app.settings.currency_label);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Title").style(bold),
        Cell::from(amount_header).style(bold),
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(expense.title.clone()),
                Cell::from(Line::from(expense.amount.to_string()).right_aligned()),
                Cell::from(app.settings.format_date(expense.date)),
                Cell::from(expense.category.clone()),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}
