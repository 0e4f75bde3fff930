use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use expense_cli::cli::{handle_auth_command, handle_expense_command, CliContext};
use expense_cli::config::{ExpensePaths, Settings};
use expense_cli::logging::{self, LogTarget};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Terminal client for a remote expense-tracking API",
    long_about = "expense keeps a list of your expenses on a remote server. \
                  Add, edit and delete them from the command line, or run \
                  'expense tui' for an interactive dashboard."
)]
struct Cli {
    /// Base URL of the expense API
    #[arg(long, global = true, env = "EXPENSE_API_URL")]
    api_url: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(expense_cli::cli::ExpenseCommands),

    #[command(flatten)]
    Auth(expense_cli::cli::AuthCommands),

    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }

    // The TUI owns the terminal, so its logs go to a file
    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    let target = if tui_mode {
        LogTarget::File(paths.log_file())
    } else {
        LogTarget::Stderr
    };
    logging::init(cli.verbose, target)?;
    debug!(api = %settings.api_base_url, data_dir = %paths.base_dir().display(), "starting");

    let ctx = CliContext::new(paths, settings);

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd)?,
        Some(Commands::Config) => print_config(&ctx),
        Some(Commands::Tui) | None => {
            let account = ctx.session_store().load()?.and_then(|s| s.email.clone());
            let controller = ctx.expense_controller()?;
            expense_cli::tui::run_tui(&controller, &ctx.settings, account)?;
        }
    }

    Ok(())
}

fn print_config(ctx: &CliContext) {
    let paths = &ctx.paths;
    let settings = &ctx.settings;

    println!("expense-cli Configuration");
    println!("=========================");
    println!("Data directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Session file:   {}", paths.session_file().display());
    println!("Activity log:   {}", paths.activity_log().display());
    println!("Log file:       {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:    {}", settings.api_base_url);
    println!("  Request timeout: {}s", settings.request_timeout_secs);
    println!("  Currency label:  {}", settings.currency_label);
    println!("  Date format:     {}", settings.date_format);
}
