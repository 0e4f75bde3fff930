//! Confirmation gate for destructive operations

use std::io::{self, BufRead, Write};

/// Asks the user to approve an action before it is dispatched
pub trait Confirm {
    /// Return `true` to proceed
    fn confirm(&self, message: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Approves without asking (the user already confirmed, e.g. `--force`)
#[derive(Debug, Clone, Copy, Default)]
pub struct Confirmed;

impl Confirm for Confirmed {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// Prompts on the terminal and accepts "y" or "yes"
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => is_yes(&input),
            Err(_) => false,
        }
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yeah"));
    }

    #[test]
    fn test_closure_gate() {
        let deny = |_: &str| false;
        assert!(!deny.confirm("Delete?"));
        assert!(Confirmed.confirm("Delete?"));
    }
}
