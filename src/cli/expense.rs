//! Expense CLI commands
//!
//! Implements the one-shot list/add/update/delete commands on top of the
//! expense list controller, plus the activity history.

use clap::Subcommand;

use super::{prompt_line, CliContext};
use crate::display::{format_expense_details, format_expense_list, format_history};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{DraftField, ExpenseDraft, ExpenseId};
use crate::services::{Confirm, Confirmed, Deletion, StdinConfirm};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List all expenses
    #[command(alias = "ls")]
    List,

    /// Add a new expense
    Add {
        /// What the money was spent on
        #[arg(short, long)]
        title: Option<String>,
        /// Amount, e.g. 200 or 200.50
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Update an existing expense
    ///
    /// Fields not given keep their current value.
    #[command(alias = "edit")]
    Update {
        /// Expense ID
        id: ExpenseId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Prompt for each field, showing the current value
        #[arg(short, long)]
        interactive: bool,
    },

    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show expense details
    Show {
        /// Expense ID
        id: ExpenseId,
    },

    /// Show recent create/update/delete activity
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

/// Handle an expense command
pub fn handle_expense_command(ctx: &CliContext, cmd: ExpenseCommands) -> ExpenseResult<()> {
    match cmd {
        ExpenseCommands::List => {
            let controller = ctx.expense_controller()?;
            controller.load()?;
            println!("{}", format_expense_list(&controller.expenses(), &ctx.settings).trim_end());
        }

        ExpenseCommands::Add {
            title,
            amount,
            category,
            date,
        } => {
            let draft = ExpenseDraft {
                title: title.unwrap_or_default(),
                amount: amount.unwrap_or_default(),
                category: category.unwrap_or_default(),
                date: date.unwrap_or_default(),
            };

            let controller = ctx.expense_controller()?;
            let created = controller.create(draft)?;
            println!("Created expense #{}: {}", created.id, created);
        }

        ExpenseCommands::Update {
            id,
            title,
            amount,
            category,
            date,
            interactive,
        } => {
            let overrides = [
                (DraftField::Title, title),
                (DraftField::Amount, amount),
                (DraftField::Category, category),
                (DraftField::Date, date),
            ];
            if !interactive && overrides.iter().all(|(_, value)| value.is_none()) {
                return Err(ExpenseError::Validation(
                    "Nothing to update. Pass a field option or --interactive".into(),
                ));
            }

            let controller = ctx.expense_controller()?;
            controller.load()?;
            let current = controller
                .get(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;

            let mut form = ExpenseDraft::from_expense(&current);
            apply_overrides(&mut form, overrides);

            if interactive {
                println!("Editing expense #{} (press Enter to keep a value)", id);
                for field in DraftField::ALL {
                    let value = prompt_line(field_label(field), Some(form.get(field)))?;
                    form.set(field, value);
                }
            }

            let updated = controller.update(&id, &form)?;
            println!("Updated expense #{}: {}", updated.id, updated);
        }

        ExpenseCommands::Delete { id, force } => {
            let controller = ctx.expense_controller()?;
            controller.load()?;

            let confirm: &dyn Confirm = if force { &Confirmed } else { &StdinConfirm };
            match controller.delete(&id, confirm)? {
                Deletion::Deleted(expense) => println!("Deleted expense #{}: {}", expense.id, expense.title),
                Deletion::Cancelled => println!("Cancelled."),
            }
        }

        ExpenseCommands::Show { id } => {
            let controller = ctx.expense_controller()?;
            controller.load()?;
            let expense = controller
                .get(&id)
                .ok_or_else(|| ExpenseError::expense_not_found(id.as_str()))?;
            print!("{}", format_expense_details(&expense, &ctx.settings));
        }

        ExpenseCommands::History { limit } => {
            let entries = ctx.audit_logger().read_recent(limit)?;
            println!("{}", format_history(&entries).trim_end());
        }
    }

    Ok(())
}

fn apply_overrides(form: &mut ExpenseDraft, overrides: [(DraftField, Option<String>); 4]) {
    for (field, value) in overrides {
        if let Some(value) = value {
            form.set(field, value);
        }
    }
}

fn field_label(field: DraftField) -> &'static str {
    match field {
        DraftField::Title => "Title",
        DraftField::Amount => "Amount",
        DraftField::Category => "Category",
        DraftField::Date => "Date (YYYY-MM-DD)",
    }
}
