//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the
//! current application state.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::event::Event;
use crate::api::ExpenseApi;

/// Handle an incoming event
pub fn handle_event<A: ExpenseApi>(app: &mut App<'_, A>, event: Event) -> Result<()> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Key(_) | Event::Resize(_, _) => Ok(()),
        Event::Tick => {
            app.notifications.remove_expired();
            Ok(())
        }
    }
}

/// Handle a key event
fn handle_key_event<A: ExpenseApi>(app: &mut App<'_, A>, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    match app.active_dialog {
        ActiveDialog::None => handle_normal_key(app, key),
        ActiveDialog::Help => {
            app.close_dialog();
            Ok(())
        }
        ActiveDialog::AddExpense | ActiveDialog::EditExpense(_) => handle_form_key(app, key),
        ActiveDialog::ConfirmDelete(_) => handle_confirm_key(app, key),
        ActiveDialog::Error(_) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                app.close_dialog();
            }
            Ok(())
        }
    }
}

/// Handle keys on the dashboard
fn handle_normal_key<A: ExpenseApi>(app: &mut App<'_, A>, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.active_dialog = ActiveDialog::Help,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // Operations
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add(),
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit(),
        KeyCode::Char('d') | KeyCode::Delete => app.open_delete(),
        KeyCode::Char('r') => app.reload(),

        _ => {}
    }

    Ok(())
}

/// Handle keys in the add/edit form
fn handle_form_key<A: ExpenseApi>(app: &mut App<'_, A>, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            return Ok(());
        }
        KeyCode::Enter => {
            app.submit_form();
            return Ok(());
        }
        _ => {}
    }

    let form = &mut app.expense_form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),

        KeyCode::Char(c) => {
            form.focused_input_mut().insert(c);
            form.error_message = None;
        }
        KeyCode::Backspace => form.focused_input_mut().backspace(),
        KeyCode::Delete => form.focused_input_mut().delete(),
        KeyCode::Left => form.focused_input_mut().move_left(),
        KeyCode::Right => form.focused_input_mut().move_right(),
        KeyCode::Home => form.focused_input_mut().move_start(),
        KeyCode::End => form.focused_input_mut().move_end(),

        _ => {}
    }

    Ok(())
}

/// Handle keys in the delete confirmation
fn handle_confirm_key<A: ExpenseApi>(app: &mut App<'_, A>, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }

    Ok(())
}
