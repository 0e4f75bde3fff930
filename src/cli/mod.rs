//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod expense;

pub use auth::{handle_auth_command, AuthCommands};
pub use expense::{handle_expense_command, ExpenseCommands};

use std::io::{self, BufRead, Write};

use crate::api::{ApiClient, HttpExpenseApi};
use crate::audit::AuditLogger;
use crate::config::{ExpensePaths, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::services::ExpenseListController;
use crate::session::SessionStore;

/// Everything a command handler needs from the environment
#[derive(Debug, Clone)]
pub struct CliContext {
    pub paths: ExpensePaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn new(paths: ExpensePaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(&self.paths)
    }

    pub fn audit_logger(&self) -> AuditLogger {
        AuditLogger::new(self.paths.activity_log())
    }

    /// Client without credentials, for the login/register/reset flows
    pub fn anonymous_client(&self) -> ExpenseResult<ApiClient> {
        ApiClient::new(&self.settings, None)
    }

    /// Controller authenticated with the stored session, if any
    ///
    /// A missing session is not an error here; the first request reports it.
    pub fn expense_controller(&self) -> ExpenseResult<ExpenseListController<HttpExpenseApi>> {
        let session = self.session_store().load()?;
        let client = ApiClient::new(&self.settings, session)?;
        Ok(ExpenseListController::new(HttpExpenseApi::new(client)).with_audit(self.audit_logger()))
    }
}

/// Prompt for a line of input
///
/// When `current` is given it is shown in brackets and returned for an
/// empty answer.
pub(crate) fn prompt_line(label: &str, current: Option<&str>) -> ExpenseResult<String> {
    match current {
        Some(value) => print!("{} [{}]: ", label, value),
        None => print!("{}: ", label),
    }
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().lock().read_line(&mut input)?;
    if read == 0 && current.is_none() {
        return Err(ExpenseError::Validation(format!("{} is required", label)));
    }

    Ok(resolve_input(&input, current))
}

fn resolve_input(input: &str, current: Option<&str>) -> String {
    let trimmed = input.trim_end_matches(['\r', '\n']);
    match current {
        Some(value) if trimmed.trim().is_empty() => value.to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_keeps_current_on_empty() {
        assert_eq!(resolve_input("\n", Some("Lunch")), "Lunch");
        assert_eq!(resolve_input("   \r\n", Some("Lunch")), "Lunch");
        assert_eq!(resolve_input("Brunch\n", Some("Lunch")), "Brunch");
        assert_eq!(resolve_input("\n", None), "");
    }

    #[test]
    fn test_context_paths() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = CliContext::new(
            ExpensePaths::with_base_dir(temp_dir.path().to_path_buf()),
            Settings::default(),
        );

        assert_eq!(ctx.audit_logger().path(), &temp_dir.path().join("activity.log"));
        assert_eq!(ctx.session_store().path(), &temp_dir.path().join("session.json"));
        assert!(ctx.expense_controller().unwrap().is_empty());
    }
}
