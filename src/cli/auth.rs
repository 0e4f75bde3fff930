//! Account CLI commands
//!
//! Login, registration, logout and password recovery. Passwords are read
//! with a hidden prompt and wiped from memory once the request is sent.

use clap::Subcommand;
use tracing::info;
use zeroize::Zeroizing;

use super::{prompt_line, CliContext};
use crate::api::{reset_token_from_input, AuthApi};
use crate::error::{ExpenseError, ExpenseResult};

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Sign in and store the session
    Login {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Request a password-reset link by email
    ForgotPassword {
        /// Account email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Set a new password using a reset link or token
    ResetPassword {
        /// Reset link from the email, or the bare token
        link: Option<String>,
    },

    /// Show the stored session
    Whoami,
}

/// Handle an account command
pub fn handle_auth_command(ctx: &CliContext, cmd: AuthCommands) -> ExpenseResult<()> {
    match cmd {
        AuthCommands::Login { email } => {
            let email = email_or_prompt(email)?;
            let password = read_password("Password: ")?;

            let api = AuthApi::new(ctx.anonymous_client()?);
            let session = api.login(&email, &password)?;

            ctx.paths.ensure_directories()?;
            ctx.session_store().save(&session)?;
            info!(%email, "logged in");
            println!("Logged in as {}", email);
        }

        AuthCommands::Register { email } => {
            let email = email_or_prompt(email)?;
            let password = read_new_password()?;

            let api = AuthApi::new(ctx.anonymous_client()?);
            let session = api.register(&email, &password)?;

            ctx.paths.ensure_directories()?;
            ctx.session_store().save(&session)?;
            info!(%email, "registered");
            println!("Registered and logged in as {}", email);
        }

        AuthCommands::Logout => {
            if ctx.session_store().clear()? {
                println!("Logged out.");
            } else {
                println!("Not logged in.");
            }
        }

        AuthCommands::ForgotPassword { email } => {
            let email = email_or_prompt(email)?;

            let api = AuthApi::new(ctx.anonymous_client()?);
            api.forgot_password(&email)?;
            println!("Password reset link sent to {}", email);
        }

        AuthCommands::ResetPassword { link } => {
            let input = match link {
                Some(link) => link,
                None => prompt_line("Reset link or token", None)?,
            };
            let token = reset_token_from_input(&input).ok_or_else(|| {
                ExpenseError::Validation("No reset token found in the given link".into())
            })?;
            let password = read_new_password()?;

            let api = AuthApi::new(ctx.anonymous_client()?);
            api.reset_password(&token, &password)?;
            println!("Password updated. Run 'expense login' to sign in.");
        }

        AuthCommands::Whoami => match ctx.session_store().load()? {
            None => println!("Not logged in."),
            Some(session) => {
                println!(
                    "Logged in as {}",
                    session.email.as_deref().unwrap_or("(unknown account)")
                );
                println!("  Since:   {}", session.issued_at.format("%Y-%m-%d %H:%M UTC"));
                match session.expires_at {
                    Some(expiry) if session.is_expired() => {
                        println!("  Expired: {}", expiry.format("%Y-%m-%d %H:%M UTC"));
                        println!("Run 'expense login' to sign in again.");
                    }
                    Some(expiry) => println!("  Expires: {}", expiry.format("%Y-%m-%d %H:%M UTC")),
                    None => println!("  Expires: unknown"),
                }
            }
        },
    }

    Ok(())
}

fn email_or_prompt(email: Option<String>) -> ExpenseResult<String> {
    let email = match email {
        Some(email) => email,
        None => prompt_line("Email", None)?,
    };
    Ok(email.trim().to_string())
}

fn read_password(prompt: &str) -> ExpenseResult<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .map_err(|e| ExpenseError::Io(format!("Failed to read password: {}", e)))
}

fn read_new_password() -> ExpenseResult<Zeroizing<String>> {
    let password = read_password("New password: ")?;
    let confirmation = read_password("Confirm password: ")?;
    check_passwords_match(&password, &confirmation)?;
    Ok(password)
}

fn check_passwords_match(password: &str, confirmation: &str) -> ExpenseResult<()> {
    if password.is_empty() {
        return Err(ExpenseError::Validation("Password is required".into()));
    }
    if password != confirmation {
        return Err(ExpenseError::Validation("Passwords do not match".into()));
    }
    Ok(())
}
