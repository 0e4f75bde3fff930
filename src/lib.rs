//! expense-cli - Terminal client for a remote expense-tracking API
//!
//! This library provides the core functionality for the `expense` binary:
//! an authenticated HTTP client for the expense API, a controller that keeps
//! a local copy of the user's expenses in step with the server, and the CLI
//! and TUI front ends built on it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense records, amounts, ids and the editable draft
//! - `session`: Bearer token session and its on-disk store
//! - `api`: HTTP client for the expense and account endpoints
//! - `services`: The expense list controller and confirmation seam
//! - `audit`: Local activity log of create/update/delete
//! - `display`: Plain-text rendering for CLI output
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//! - `logging`: Diagnostic log setup
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_cli::config::{ExpensePaths, Settings};
//! use expense_cli::cli::CliContext;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let controller = CliContext::new(paths, settings).expense_controller()?;
//! controller.load()?;
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;
pub mod tui;

pub use error::ExpenseError;
