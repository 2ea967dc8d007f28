//! Deposit CLI commands

use clap::Subcommand;

use crate::display::format_deposit_list;
use crate::error::ExpenseResult;
use crate::services::{DepositInput, DepositService, FundService};
use crate::storage::Storage;

use super::{parse_date, parse_money, parse_month};

/// Deposit subcommands
#[derive(Subcommand)]
pub enum DepositCommands {
    /// Record money coming into a fund
    Add {
        /// Fund name or ID
        fund: String,
        /// Amount (e.g., "500" or "500.00")
        amount: String,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Reference number
        #[arg(long)]
        reference: Option<String>,
    },
    /// List deposits
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only this fund
        #[arg(short, long)]
        fund: Option<String>,
    },
    /// Edit a deposit
    Edit {
        /// Deposit ID
        deposit: String,
        /// Move to another fund
        #[arg(short, long)]
        fund: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New description (empty to clear)
        #[arg(long)]
        description: Option<String>,
        /// New reference number (empty to clear)
        #[arg(long)]
        reference: Option<String>,
    },
    /// Delete a deposit and take its amount back out of the fund
    Delete {
        /// Deposit ID
        deposit: String,
    },
}

/// Handle a deposit command
pub fn handle_deposit_command(storage: &Storage, cmd: DepositCommands) -> ExpenseResult<()> {
    let service = DepositService::new(storage);
    let funds = FundService::new(storage);

    match cmd {
        DepositCommands::Add {
            fund,
            amount,
            date,
            description,
            reference,
        } => {
            let fund = funds.resolve(&fund)?;
            let deposit = service.create(DepositInput {
                date: parse_date(date.as_deref())?,
                fund_id: fund.id,
                amount: parse_money(&amount)?,
                description,
                reference_number: reference,
            })?;

            println!("Deposited {} into {}", deposit.amount, fund.name);
            println!("  ID: {}", deposit.id);
        }

        DepositCommands::List { month, fund } => {
            let mut deposits = service.list()?;
            if let Some(month) = month {
                let month = parse_month(Some(&month))?;
                deposits.retain(|d| month.contains(d.date));
            }
            if let Some(fund) = fund {
                let fund_id = funds.resolve(&fund)?.id;
                deposits.retain(|d| d.monetary_fund_id == fund_id);
            }
            println!("{}", format_deposit_list(&deposits, &funds.list()?));
        }

        DepositCommands::Edit {
            deposit,
            fund,
            amount,
            date,
            description,
            reference,
        } => {
            let existing = service.resolve(&deposit)?;

            let input = DepositInput {
                date: match date {
                    Some(d) => parse_date(Some(&d))?,
                    None => existing.date,
                },
                fund_id: match fund {
                    Some(f) => funds.resolve(&f)?.id,
                    None => existing.monetary_fund_id,
                },
                amount: match amount {
                    Some(a) => parse_money(&a)?,
                    None => existing.amount,
                },
                description: description.or(existing.description),
                reference_number: reference.or(existing.reference_number),
            };

            let updated = service.update(existing.id, input)?;
            println!("Updated deposit {}: {}", updated.id, updated.amount);
        }

        DepositCommands::Delete { deposit } => {
            let found = service.resolve(&deposit)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted deposit {}: {}", deleted.id, deleted.amount);
        }
    }

    Ok(())
}
