//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::ExpenseResult;
use crate::reports::{BudgetComparisonReport, DashboardSummary};
use crate::storage::Storage;

use super::{parse_month, require_session};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Balances and monthly totals at a glance
    Dashboard {
        /// Month (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Budgeted versus spent per expense type
    Budget {
        /// Month (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let session = require_session(storage, settings)?;

    match cmd {
        ReportCommands::Dashboard { month } => {
            let month = parse_month(month.as_deref())?;
            let summary = DashboardSummary::generate(storage, &session, month)?;
            print!("{}", summary.format_terminal());
        }

        ReportCommands::Budget { month } => {
            let month = parse_month(month.as_deref())?;
            let report = BudgetComparisonReport::generate(storage, &session, month)?;
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
