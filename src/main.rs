use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_control::cli::{
    handle_budget_command, handle_deposit_command, handle_expense_command, handle_export_command,
    handle_fund_command, handle_login, handle_logout, handle_movements_command, handle_register,
    handle_report_command, handle_type_command, handle_whoami, BudgetCommands, DepositCommands,
    ExpenseCommands, ExportCommands, FundCommands, LoginArgs, MovementArgs, RegisterArgs,
    ReportCommands, TypeCommands,
};
use expense_control::config::{paths::ExpensePaths, settings::Settings};
use expense_control::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracking from the command line",
    long_about = "Track what you spend and where it comes from: record deposits and \
                  itemized expenses against your bank accounts and cash boxes, set \
                  monthly budgets per expense type, and see how spending compares."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with default types and funds
    Init,

    /// Show current configuration and paths
    Config,

    /// Create a user account
    Register(RegisterArgs),

    /// Log in and start a session
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Expense type management commands
    #[command(subcommand, name = "type")]
    ExpenseType(TypeCommands),

    /// Monetary fund management commands
    #[command(subcommand)]
    Fund(FundCommands),

    /// Budget management commands (requires login)
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Deposit management commands
    #[command(subcommand)]
    Deposit(DepositCommands),

    /// List expenses and deposits together, newest first
    #[command(alias = "mov")]
    Movements(MovementArgs),

    /// Reports (requires login)
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense-control at: {}", paths.data_dir().display());
            if settings.ensure_secret() {
                println!("Generated a new token signing secret.");
            }
            settings.save(&paths)?;

            let summary = initialize_storage(&paths)?;
            if summary.seeded_anything() {
                println!("Default data has been created:");
                if summary.expense_types_seeded > 0 {
                    println!("  - Expense types: 001 Food, 002 Transport, 003 Entertainment");
                }
                if summary.funds_seeded > 0 {
                    println!("  - Funds: Checking Account (bank), Petty Cash (cash)");
                }
            } else {
                println!("Existing data found; nothing was overwritten.");
            }
            println!("Initialization complete!");
            println!();
            println!("Run 'expense register <username>' to create your user.");
        }
        Some(Commands::Config) => {
            println!("expense-control Configuration");
            println!("=============================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Token issuer:    {}", settings.auth.issuer);
            println!("  Token audience:  {}", settings.auth.audience);
            println!("  Token lifetime:  {}h", settings.auth.expiration_hours);
            println!(
                "  Signing secret:  {}",
                if settings.auth.effective_secret().is_ok() {
                    "configured"
                } else {
                    "missing (run 'expense init')"
                }
            );
        }
        Some(Commands::Register(args)) => handle_register(&storage, &settings, args)?,
        Some(Commands::Login(args)) => handle_login(&storage, &settings, args)?,
        Some(Commands::Logout) => handle_logout(&storage, &settings)?,
        Some(Commands::Whoami) => handle_whoami(&storage, &settings)?,
        Some(Commands::ExpenseType(cmd)) => handle_type_command(&storage, cmd)?,
        Some(Commands::Fund(cmd)) => handle_fund_command(&storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&storage, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, cmd)?,
        Some(Commands::Deposit(cmd)) => handle_deposit_command(&storage, cmd)?,
        Some(Commands::Movements(args)) => handle_movements_command(&storage, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        None => {
            println!("expense-control - Personal expense tracking");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init' to set up a new data directory.");
        }
    }

    Ok(())
}
