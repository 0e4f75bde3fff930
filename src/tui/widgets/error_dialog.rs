//! Error dialog widget
//!
//! Displays a failed operation with recovery suggestions.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::ExpenseError;

/// An error with details and suggestions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// The error title/summary
    pub title: String,
    /// Detailed error message
    pub details: String,
    /// Suggested recovery actions
    pub suggestions: Vec<String>,
}

impl ErrorInfo {
    /// Create error info from an ExpenseError
    pub fn from_error(error: &ExpenseError) -> Self {
        let (title, details, suggestions) = match error {
            ExpenseError::Session(msg) => (
                "Not Signed In".to_string(),
                msg.clone(),
                vec![
                    "Quit and run 'expense login'".to_string(),
                    "Then start the dashboard again with 'expense tui'".to_string(),
                ],
            ),
            ExpenseError::Status { status, message } if error.is_unauthorized() => (
                "Session Rejected".to_string(),
                format!("The server refused the stored session ({}): {}", status, message),
                vec!["Quit and run 'expense login' to sign in again".to_string()],
            ),
            ExpenseError::Status { status, message } => (
                "Server Error".to_string(),
                format!("The server answered {}: {}", status, message),
                vec!["Press 'r' to reload and try again".to_string()],
            ),
            ExpenseError::Request(msg) => (
                "Connection Error".to_string(),
                msg.clone(),
                vec![
                    "Check that the expense server is running".to_string(),
                    "Check 'api_base_url' with 'expense config'".to_string(),
                    "Press 'r' to retry".to_string(),
                ],
            ),
            ExpenseError::Validation(msg) => (
                "Validation Error".to_string(),
                msg.clone(),
                vec!["Review the input values and try again".to_string()],
            ),
            ExpenseError::NotFound {
                entity_type,
                identifier,
            } => (
                format!("{} Not Found", entity_type),
                format!(
                    "Could not find {} with id '{}'",
                    entity_type.to_lowercase(),
                    identifier
                ),
                vec!["Press 'r' to reload the list".to_string()],
            ),
            ExpenseError::Busy(msg) => (
                "Please Wait".to_string(),
                format!("The {} is still in progress", msg),
                vec![],
            ),
            ExpenseError::Config(msg) => (
                "Configuration Error".to_string(),
                msg.clone(),
                vec!["Check your settings file for syntax errors".to_string()],
            ),
            ExpenseError::Io(msg) | ExpenseError::Json(msg) => (
                "Local File Error".to_string(),
                msg.clone(),
                vec!["Check that you have write permissions to the data directory".to_string()],
            ),
            ExpenseError::Tui(msg) => (
                "Interface Error".to_string(),
                msg.clone(),
                vec![
                    "Try resizing your terminal window".to_string(),
                    "Use the CLI commands instead".to_string(),
                ],
            ),
        };

        Self {
            title,
            details,
            suggestions,
        }
    }
}

/// Widget for rendering an error dialog
pub struct ErrorDialog<'a> {
    error: &'a ErrorInfo,
}

impl<'a> ErrorDialog<'a> {
    /// Create a new error dialog widget
    pub fn new(error: &'a ErrorInfo) -> Self {
        Self { error }
    }
}

impl Widget for ErrorDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" Error: {} ", self.error.title))
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Details
                Constraint::Min(1),    // Suggestions
                Constraint::Length(1), // Close hint
            ])
            .split(inner);

        Paragraph::new(self.error.details.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        if !self.error.suggestions.is_empty() {
            let mut lines: Vec<Line> = vec![Line::from(Span::styled(
                "Suggestions:",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))];

            for suggestion in &self.error.suggestions {
                lines.push(Line::from(vec![
                    Span::raw("  - "),
                    Span::raw(suggestion.as_str()),
                ]));
            }

            Paragraph::new(lines)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        }

        Paragraph::new("Press Esc or Enter to close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }
}

/// Calculate the area for an error dialog (centered in parent)
pub fn error_dialog_area(parent: Rect) -> Rect {
    let width = (parent.width * 70 / 100).clamp(40, 80).min(parent.width);
    let height = (parent.height * 50 / 100).clamp(10, 16).min(parent.height);

    let x = parent.x + parent.width.saturating_sub(width) / 2;
    let y = parent.y + parent.height.saturating_sub(height) / 2;

    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_suggests_login() {
        let info = ErrorInfo::from_error(&ExpenseError::Session("Session expired".into()));

        assert_eq!(info.title, "Not Signed In");
        assert!(info.suggestions[0].contains("expense login"));
    }

    #[test]
    fn test_unauthorized_status_is_a_session_problem() {
        let info = ErrorInfo::from_error(&ExpenseError::Status {
            status: 401,
            message: "Invalid token".into(),
        });
        assert_eq!(info.title, "Session Rejected");

        let info = ErrorInfo::from_error(&ExpenseError::Status {
            status: 500,
            message: "boom".into(),
        });
        assert_eq!(info.title, "Server Error");
    }

    #[test]
    fn test_error_info_from_not_found() {
        let info = ErrorInfo::from_error(&ExpenseError::expense_not_found("7"));

        assert_eq!(info.title, "Expense Not Found");
        assert!(info.details.contains("'7'"));
    }

    #[test]
    fn test_dialog_area_fits_small_terminals() {
        let area = error_dialog_area(Rect::new(0, 0, 30, 8));
        assert!(area.width <= 30);
        assert!(area.height <= 8);
    }
}
