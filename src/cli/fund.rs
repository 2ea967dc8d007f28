//! Monetary fund CLI commands

use clap::Subcommand;

use crate::display::{format_fund_details, format_fund_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{FundType, Money};
use crate::services::{FundService, FundUpdate};
use crate::storage::Storage;

use super::parse_money;

/// Monetary fund subcommands
#[derive(Subcommand)]
pub enum FundCommands {
    /// Create a monetary fund
    Create {
        /// Fund name
        name: String,
        /// Fund type (bank, cash)
        #[arg(short = 't', long, default_value = "bank")]
        fund_type: String,
        /// Opening balance (e.g., "1000.00" or "1000")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Account number
        #[arg(long)]
        account_number: Option<String>,
        /// Bank name
        #[arg(long)]
        bank: Option<String>,
    },
    /// List all funds with balances
    List,
    /// Show fund details
    Show {
        /// Fund name or ID
        fund: String,
    },
    /// Edit a fund
    Edit {
        /// Fund name or ID
        fund: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New type (bank, cash)
        #[arg(short = 't', long)]
        fund_type: Option<String>,
        /// New account number (empty to clear)
        #[arg(long)]
        account_number: Option<String>,
        /// New bank name (empty to clear)
        #[arg(long)]
        bank: Option<String>,
    },
    /// Overwrite a fund's balance after a manual count
    SetBalance {
        /// Fund name or ID
        fund: String,
        /// New balance
        amount: String,
    },
    /// Delete a fund that has no deposits or expenses
    Delete {
        /// Fund name or ID
        fund: String,
    },
}

fn parse_fund_type(input: &str) -> ExpenseResult<FundType> {
    FundType::parse(input).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid fund type: '{}'. Valid types: bank, cash",
            input
        ))
    })
}

/// Handle a monetary fund command
pub fn handle_fund_command(storage: &Storage, cmd: FundCommands) -> ExpenseResult<()> {
    let service = FundService::new(storage);

    match cmd {
        FundCommands::Create {
            name,
            fund_type,
            balance,
            account_number,
            bank,
        } => {
            let fund_type = parse_fund_type(&fund_type)?;
            let opening: Money = parse_money(&balance)?;

            let fund = service.create(
                &name,
                fund_type,
                opening,
                account_number.as_deref(),
                bank.as_deref(),
            )?;

            println!("Created fund: {}", fund.name);
            println!("  Type: {}", fund.fund_type);
            println!("  Balance: {}", fund.balance);
            println!("  ID: {}", fund.id);
        }

        FundCommands::List => {
            println!("{}", format_fund_list(&service.list()?));
        }

        FundCommands::Show { fund } => {
            print!("{}", format_fund_details(&service.resolve(&fund)?));
        }

        FundCommands::Edit {
            fund,
            name,
            fund_type,
            account_number,
            bank,
        } => {
            let changes = FundUpdate {
                name,
                fund_type: fund_type.as_deref().map(parse_fund_type).transpose()?,
                account_number,
                bank_name: bank,
            };

            if changes.name.is_none()
                && changes.fund_type.is_none()
                && changes.account_number.is_none()
                && changes.bank_name.is_none()
            {
                println!("No changes specified. Use --name, --fund-type, --account-number or --bank.");
                return Ok(());
            }

            let found = service.resolve(&fund)?;
            let updated = service.update(found.id, changes)?;
            println!("Updated fund: {}", updated.name);
        }

        FundCommands::SetBalance { fund, amount } => {
            let found = service.resolve(&fund)?;
            let updated = service.set_balance(found.id, parse_money(&amount)?)?;
            println!("Balance of {} set to {}", updated.name, updated.balance);
        }

        FundCommands::Delete { fund } => {
            let found = service.resolve(&fund)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted fund: {}", deleted.name);
        }
    }

    Ok(())
}
