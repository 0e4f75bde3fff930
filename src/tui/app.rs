//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.
//! Dashboard actions (load, save, delete) go through the expense list
//! controller; every outcome is shown as a toast, and failures that need
//! the user's attention open an error dialog.

use tracing::debug;

use crate::api::ExpenseApi;
use crate::config::settings::Settings;
use crate::error::{ErrorKind, ExpenseError};
use crate::models::{Expense, ExpenseDraft, ExpenseId};
use crate::services::{Confirmed, Deletion, ExpenseListController};

use super::dialogs::expense_form::ExpenseFormState;
use super::widgets::{ErrorInfo, Notification, NotificationQueue};

/// Currently active dialog (if any)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    AddExpense,
    EditExpense(ExpenseId),
    ConfirmDelete(ExpenseId),
    Error(ErrorInfo),
}

/// Main application state
pub struct App<'a, A: ExpenseApi> {
    /// The expense list controller
    pub controller: &'a ExpenseListController<A>,

    /// Application settings
    pub settings: &'a Settings,

    /// Account shown in the header
    pub account: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Selected row in the expense table
    pub selected_index: usize,

    /// Add/edit form state
    pub expense_form: ExpenseFormState,

    /// Status message to display
    pub status_message: Option<String>,

    /// Toasts
    pub notifications: NotificationQueue,
}

impl<'a, A: ExpenseApi> App<'a, A> {
    /// Create a new App instance
    pub fn new(controller: &'a ExpenseListController<A>, settings: &'a Settings) -> Self {
        Self {
            controller,
            settings,
            account: None,
            should_quit: false,
            active_dialog: ActiveDialog::default(),
            selected_index: 0,
            expense_form: ExpenseFormState::default(),
            status_message: None,
            notifications: NotificationQueue::new(),
        }
    }

    /// Request to quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    // ----- selection -----

    /// The expense under the cursor
    pub fn selected_expense(&self) -> Option<Expense> {
        self.controller.expenses().get(self.selected_index).cloned()
    }

    /// Move selection up
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.controller.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.controller.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    // ----- actions -----

    /// Load the list from the server
    pub fn reload(&mut self) {
        match self.controller.load() {
            Ok(count) => {
                self.clamp_selection();
                self.set_status(format!("{} expense(s)", count));
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Open the add form, resuming any unsaved draft
    pub fn open_add(&mut self) {
        self.expense_form = ExpenseFormState::for_add(&self.controller.draft());
        self.active_dialog = ActiveDialog::AddExpense;
    }

    /// Open the edit form for the selected expense
    pub fn open_edit(&mut self) {
        if let Some(expense) = self.selected_expense() {
            self.expense_form = ExpenseFormState::for_edit(&ExpenseDraft::from_expense(&expense));
            self.active_dialog = ActiveDialog::EditExpense(expense.id);
        }
    }

    /// Ask before deleting the selected expense
    pub fn open_delete(&mut self) {
        if let Some(expense) = self.selected_expense() {
            self.active_dialog = ActiveDialog::ConfirmDelete(expense.id);
        }
    }

    /// Submit the add/edit form
    ///
    /// On success the dialog closes; on failure it stays open with the
    /// error shown and the typed values intact.
    pub fn submit_form(&mut self) {
        let draft = self.expense_form.to_draft();
        let adding = self.active_dialog == ActiveDialog::AddExpense;
        let result = match self.active_dialog.clone() {
            ActiveDialog::AddExpense => self
                .controller
                .create(draft)
                .map(|created| format!("Added '{}'", created.title)),
            ActiveDialog::EditExpense(id) => self
                .controller
                .update(&id, &draft)
                .map(|updated| format!("Updated '{}'", updated.title)),
            _ => return,
        };

        match result {
            Ok(message) => {
                if adding {
                    self.select_last();
                }
                self.close_dialog();
                self.notifications.push(Notification::success(message));
            }
            Err(e) => {
                self.expense_form.error_message = Some(e.to_string());
                self.notifications.push(Notification::error(e.to_string()));
            }
        }
    }

    /// Close the form; an unsaved new expense stays as the draft
    pub fn cancel_form(&mut self) {
        if self.active_dialog == ActiveDialog::AddExpense {
            self.controller.set_draft(self.expense_form.to_draft());
        }
        self.close_dialog();
    }

    /// Delete the expense awaiting confirmation
    pub fn confirm_delete(&mut self) {
        let ActiveDialog::ConfirmDelete(id) = self.active_dialog.clone() else {
            return;
        };
        self.close_dialog();

        // The dialog was the confirmation
        match self.controller.delete(&id, &Confirmed) {
            Ok(Deletion::Deleted(expense)) => {
                self.clamp_selection();
                self.notifications
                    .push(Notification::success(format!("Deleted '{}'", expense.title)));
            }
            Ok(Deletion::Cancelled) => debug!(%id, "delete cancelled"),
            Err(e) => self.report_error(e),
        }
    }

    /// Dismiss the delete confirmation
    pub fn cancel_delete(&mut self) {
        self.close_dialog();
        self.set_status("Delete cancelled");
    }

    /// Surface a failure
    ///
    /// Session and transport problems open an error dialog since nothing
    /// will work until they are fixed; the rest are toasts.
    pub fn report_error(&mut self, error: ExpenseError) {
        let blocking = matches!(error.kind(), ErrorKind::Session | ErrorKind::Request);
        if blocking && !self.has_dialog() {
            self.active_dialog = ActiveDialog::Error(ErrorInfo::from_error(&error));
        } else {
            self.notifications.push(Notification::error(error.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, DraftField};
    use crate::services::fake::FakeApi;
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

    fn type_into(app: &mut App<'_, FakeApi>, field: DraftField, text: &str) {
        app.expense_form.focused_field = field;
        let input = app.expense_form.focused_input_mut();
        input.clear();
        text.chars().for_each(|c| input.insert(c));
    }

    #[test]
    fn test_reload_populates_list() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);

        app.reload();

        assert_eq!(app.selected_expense(), Some(lunch()));
        assert_eq!(app.status_message.as_deref(), Some("1 expense(s)"));
    }

    #[test]
    fn test_failed_reload_opens_error_dialog() {
        let api = FakeApi::with_records(vec![lunch()]);
        api.fail(true);
        let controller = ExpenseListController::new(api);
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);

        app.reload();

        assert!(matches!(app.active_dialog, ActiveDialog::Error(_)));
    }

    #[test]
    fn test_add_through_form() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);
        app.reload();

        app.open_add();
        type_into(&mut app, DraftField::Title, "Bus");
        type_into(&mut app, DraftField::Amount, "50");
        type_into(&mut app, DraftField::Category, "Transport");
        type_into(&mut app, DraftField::Date, "2024-01-02");
        app.submit_form();

        assert!(!app.has_dialog());
        assert_eq!(controller.len(), 2);
        assert_eq!(app.selected_expense().unwrap().title, "Bus");
    }

    #[test]
    fn test_invalid_form_stays_open_and_sends_nothing() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);
        app.reload();

        app.open_add();
        type_into(&mut app, DraftField::Title, "Bus");
        app.submit_form();

        assert_eq!(app.active_dialog, ActiveDialog::AddExpense);
        assert!(app
            .expense_form
            .error_message
            .as_deref()
            .unwrap()
            .contains("All fields are required"));
        assert_eq!(controller.api().calls(), vec!["list"]);
    }

    #[test]
    fn test_cancelled_add_keeps_draft() {
        let controller = ExpenseListController::new(FakeApi::default());
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);

        app.open_add();
        type_into(&mut app, DraftField::Title, "Tea");
        app.cancel_form();
        app.open_add();

        assert_eq!(app.expense_form.title_input.value(), "Tea");
    }

    #[test]
    fn test_edit_selected() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);
        app.reload();

        app.open_edit();
        assert_eq!(app.active_dialog, ActiveDialog::EditExpense(ExpenseId::from(1)));
        assert_eq!(app.expense_form.amount_input.value(), "200.00");

        type_into(&mut app, DraftField::Title, "Brunch");
        app.submit_form();

        assert!(!app.has_dialog());
        assert_eq!(controller.expenses()[0].title, "Brunch");
    }

    #[test]
    fn test_delete_confirmed_and_cancelled() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);
        app.reload();

        app.open_delete();
        app.cancel_delete();
        assert_eq!(controller.len(), 1);

        app.open_delete();
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmDelete(ExpenseId::from(1)));
        app.confirm_delete();

        assert!(controller.is_empty());
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_expense().is_none());
    }

    #[test]
    fn test_selection_bounds() {
        let controller = ExpenseListController::new(FakeApi::with_records(vec![lunch()]));
        let settings = Settings::default();
        let mut app = App::new(&controller, &settings);
        app.reload();

        app.move_down();
        assert_eq!(app.selected_index, 0);
        app.move_up();
        assert_eq!(app.selected_index, 0);
    }
}
