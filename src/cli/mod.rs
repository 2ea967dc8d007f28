//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod auth;
pub mod budget;
pub mod deposit;
pub mod expense;
pub mod expense_type;
pub mod export;
pub mod fund;
pub mod movements;
pub mod report;

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{BudgetMonth, Money};

pub use auth::{
    handle_login, handle_logout, handle_register, handle_whoami, require_session, LoginArgs,
    RegisterArgs,
};
pub use budget::{handle_budget_command, BudgetCommands};
pub use deposit::{handle_deposit_command, DepositCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use expense_type::{handle_type_command, TypeCommands};
pub use export::{handle_export_command, ExportCommands};
pub use fund::{handle_fund_command, FundCommands};
pub use movements::{handle_movements_command, MovementArgs};
pub use report::{handle_report_command, ReportCommands};

/// Parse a user-typed amount such as "1500", "1,500.50" or "$20"
pub(crate) fn parse_money(input: &str) -> ExpenseResult<Money> {
    Money::parse(input).map_err(|e| {
        ExpenseError::Validation(format!(
            "Invalid amount '{}'. Use a format like '100' or '100.50'. Error: {}",
            input, e
        ))
    })
}

/// Parse an ISO date, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> ExpenseResult<NaiveDate> {
    match input {
        None => Ok(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            ExpenseError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", s))
        }),
    }
}

/// Parse a YYYY-MM month, defaulting to the current one
pub(crate) fn parse_month(input: Option<&str>) -> ExpenseResult<BudgetMonth> {
    match input {
        None => Ok(BudgetMonth::current()),
        Some(s) if s.eq_ignore_ascii_case("current") => Ok(BudgetMonth::current()),
        Some(s) => BudgetMonth::parse(s)
            .map_err(|e| ExpenseError::Validation(format!("Invalid month '{}': {}", s, e))),
    }
}
