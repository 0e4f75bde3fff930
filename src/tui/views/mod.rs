//! TUI Views module
//!
//! The dashboard (header and expense table) and the status bar, with
//! dialogs and toasts drawn on top.

pub mod dashboard;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::AppLayout;
use super::widgets::{error_dialog_area, notification_area, ErrorDialog, NotificationWidget};
use crate::api::ExpenseApi;

/// Render the entire application
pub fn render<A: ExpenseApi>(frame: &mut Frame, app: &mut App<'_, A>) {
    let layout = AppLayout::new(frame.area());

    dashboard::render_header(frame, app, layout.header);
    dashboard::render(frame, app, layout.main);
    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }

    if let Some(notification) = app.notifications.current() {
        let area = notification_area(layout.main);
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

/// Render active dialog
fn render_dialog<A: ExpenseApi>(frame: &mut Frame, app: &mut App<'_, A>) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::AddExpense | ActiveDialog::EditExpense(_) => {
            dialogs::expense_form::render(frame, &app.expense_form);
        }
        ActiveDialog::ConfirmDelete(id) => {
            let title = app
                .controller
                .get(id)
                .map(|e| e.title)
                .unwrap_or_else(|| format!("#{}", id));
            dialogs::confirm::render(frame, &title);
        }
        ActiveDialog::Error(info) => {
            let area = error_dialog_area(frame.area());
            frame.render_widget(ErrorDialog::new(info), area);
        }
        ActiveDialog::None => {}
    }
}
