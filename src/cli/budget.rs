//! Budget CLI commands
//!
//! Budgets belong to the logged-in user, so every command here needs a
//! session.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget_list;
use crate::error::ExpenseResult;
use crate::services::{BudgetService, BudgetUpdate, ExpenseTypeService};
use crate::storage::Storage;

use super::{parse_money, parse_month, require_session};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Budget an amount for an expense type in a month
    Set {
        /// Expense type code, name or ID
        expense_type: String,
        /// Amount (e.g., "200" or "200.00")
        amount: String,
        /// Month (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List your budgets
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Edit a budget
    Edit {
        /// Budget ID
        budget: String,
        /// New expense type
        #[arg(short = 't', long)]
        expense_type: Option<String>,
        /// New month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> ExpenseResult<()> {
    let session = require_session(storage, settings)?;
    let service = BudgetService::new(storage);
    let types = ExpenseTypeService::new(storage);

    match cmd {
        BudgetCommands::Set {
            expense_type,
            amount,
            month,
        } => {
            let expense_type = types.resolve(&expense_type)?;
            let month = parse_month(month.as_deref())?;

            let budget = service.create(&session, expense_type.id, month, parse_money(&amount)?)?;
            println!(
                "Budgeted {} for {} in {}",
                budget.budget_amount, expense_type.name, budget.month
            );
            println!("  ID: {}", budget.id);
        }

        BudgetCommands::List { month } => {
            let month = month.as_deref().map(|m| parse_month(Some(m))).transpose()?;
            let budgets = service.list(&session, month)?;
            println!("{}", format_budget_list(&budgets, &types.list()?));
        }

        BudgetCommands::Edit {
            budget,
            expense_type,
            month,
            amount,
        } => {
            let changes = BudgetUpdate {
                expense_type_id: expense_type
                    .as_deref()
                    .map(|t| types.resolve(t).map(|t| t.id))
                    .transpose()?,
                month: month.as_deref().map(|m| parse_month(Some(m))).transpose()?,
                amount: amount.as_deref().map(parse_money).transpose()?,
            };

            if changes.expense_type_id.is_none() && changes.month.is_none() && changes.amount.is_none() {
                println!("No changes specified. Use --expense-type, --month or --amount.");
                return Ok(());
            }

            let found = service.resolve(&session, &budget)?;
            let updated = service.update(&session, found.id, changes)?;
            println!(
                "Updated budget {}: {} in {}",
                updated.id, updated.budget_amount, updated.month
            );
        }

        BudgetCommands::Delete { budget } => {
            let found = service.resolve(&session, &budget)?;
            let deleted = service.delete(&session, found.id)?;
            println!("Deleted budget {} ({})", deleted.id, deleted.month);
        }
    }

    Ok(())
}
