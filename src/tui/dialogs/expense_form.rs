//! Expense add/edit dialog
//!
//! Modal form with one input per expense field, tab navigation and
//! save/cancel. The form only holds text; validation happens when the
//! controller receives it.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::models::{DraftField, ExpenseDraft, DATE_FORMAT};
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Whether the form creates a new expense or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Add,
    Edit,
}

/// State for the expense form dialog
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormState {
    pub mode: FormMode,
    pub focused_field: DraftField,
    pub title_input: TextInput,
    pub amount_input: TextInput,
    pub category_input: TextInput,
    pub date_input: TextInput,
    /// Error from the last submit attempt
    pub error_message: Option<String>,
}

impl ExpenseFormState {
    /// Form for a new expense, resuming `draft`
    ///
    /// A blank draft gets today's date so the common case needs no typing.
    pub fn for_add(draft: &ExpenseDraft) -> Self {
        let mut draft = draft.clone();
        if draft.is_blank() {
            draft.date = Local::now().date_naive().format(DATE_FORMAT).to_string();
        }
        Self::with_values(FormMode::Add, &draft)
    }

    /// Form prefilled with an existing record
    pub fn for_edit(current: &ExpenseDraft) -> Self {
        Self::with_values(FormMode::Edit, current)
    }

    fn with_values(mode: FormMode, draft: &ExpenseDraft) -> Self {
        Self {
            mode,
            focused_field: DraftField::Title,
            title_input: TextInput::new()
                .label("Title")
                .placeholder("e.g. Lunch")
                .content(&draft.title),
            amount_input: TextInput::new()
                .label("Amount")
                .placeholder("e.g. 200 or 200.50")
                .content(&draft.amount),
            category_input: TextInput::new()
                .label("Category")
                .placeholder("e.g. Food")
                .content(&draft.category),
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(&draft.date),
            error_message: None,
        }
    }

    /// Input for one field
    pub fn input(&self, field: DraftField) -> &TextInput {
        match field {
            DraftField::Title => &self.title_input,
            DraftField::Amount => &self.amount_input,
            DraftField::Category => &self.category_input,
            DraftField::Date => &self.date_input,
        }
    }

    /// The focused input
    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field {
            DraftField::Title => &mut self.title_input,
            DraftField::Amount => &mut self.amount_input,
            DraftField::Category => &mut self.category_input,
            DraftField::Date => &mut self.date_input,
        }
    }

    /// Move focus to the next field (Tab)
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            DraftField::Title => DraftField::Amount,
            DraftField::Amount => DraftField::Category,
            DraftField::Category => DraftField::Date,
            DraftField::Date => DraftField::Title,
        };
    }

    /// Move focus to the previous field (Shift+Tab)
    pub fn prev_field(&mut self) {
        self.focused_field = match self.focused_field {
            DraftField::Title => DraftField::Date,
            DraftField::Amount => DraftField::Title,
            DraftField::Category => DraftField::Amount,
            DraftField::Date => DraftField::Category,
        };
    }

    /// Current text of every field
    pub fn to_draft(&self) -> ExpenseDraft {
        let mut draft = ExpenseDraft::new();
        for field in DraftField::ALL {
            draft.set(field, self.input(field).value());
        }
        draft
    }
}

/// Render the expense form dialog
pub fn render(frame: &mut Frame, form: &ExpenseFormState) {
    let area = centered_rect_fixed(60, 12, frame.area());

    frame.render_widget(Clear, area);

    let title = match form.mode {
        FormMode::Add => " Add Expense ",
        FormMode::Edit => " Edit Expense ",
    };

    let block = Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Date
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Error
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    for (row, field) in DraftField::ALL.into_iter().enumerate() {
        let input = form
            .input(field)
            .clone()
            .focused(form.focused_field == field);
        frame.render_widget(input, chunks[row]);
    }

    if let Some(error) = &form.error_message {
        let error_line = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        frame.render_widget(error_line, chunks[5]);
    }

    let buttons = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Tab]", Style::default().fg(Color::Cyan)),
        Span::raw(" Next field  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(buttons), chunks[6]);
}
