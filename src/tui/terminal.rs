//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;
use tracing::info;

use crate::api::ExpenseApi;
use crate::config::settings::Settings;
use crate::services::ExpenseListController;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

/// Type alias for our terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI application
///
/// The list is fetched once on start; `r` refetches it.
pub fn run_tui<A: ExpenseApi>(
    controller: &ExpenseListController<A>,
    settings: &Settings,
    account: Option<String>,
) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::new(controller, settings);
    app.account = account;
    app.reload();
    info!("tui started");

    let events = EventHandler::default();
    let outcome = run_loop(&mut terminal, &mut app, &events);

    restore_terminal()?;
    info!("tui stopped");

    outcome
}

fn run_loop<A: ExpenseApi>(
    terminal: &mut Tui,
    app: &mut App<'_, A>,
    events: &EventHandler,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;
        handle_event(app, events.next()?)?;
    }
    Ok(())
}
