//! Dialog modules for the TUI
//!
//! Contains modal dialogs for the dashboard

pub mod confirm;
pub mod expense_form;
pub mod help;
