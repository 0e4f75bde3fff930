//! Terminal User Interface module
//!
//! A single dashboard over the remote expense list, built with ratatui:
//! a table of expenses, an add/edit form, a delete confirmation, toasts
//! and an error dialog.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
