//! Movement ledger CLI command

use clap::Args;

use crate::display::format_movement_list;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{KindFilter, MovementFilter, MovementReport};
use crate::services::{ExpenseTypeService, FundService};
use crate::storage::Storage;

use super::{parse_date, parse_money};

/// Filters shared by `movements` and `export movements`
#[derive(Args, Default)]
pub struct MovementArgs {
    /// From date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,
    /// To date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
    /// Only expenses or only deposits
    #[arg(short, long)]
    pub kind: Option<String>,
    /// Only this fund
    #[arg(short, long)]
    pub fund: Option<String>,
    /// Only expenses of this type
    #[arg(short = 't', long)]
    pub expense_type: Option<String>,
    /// Minimum absolute amount
    #[arg(long)]
    pub min: Option<String>,
    /// Maximum absolute amount
    #[arg(long)]
    pub max: Option<String>,
}

impl MovementArgs {
    /// Resolve names and parse values into a filter
    pub fn to_filter(&self, storage: &Storage) -> ExpenseResult<MovementFilter> {
        let kind = self
            .kind
            .as_deref()
            .map(|k| {
                KindFilter::parse(k).ok_or_else(|| {
                    ExpenseError::Validation(format!(
                        "Invalid kind: '{}'. Valid kinds: expense, deposit",
                        k
                    ))
                })
            })
            .transpose()?;

        Ok(MovementFilter {
            date_from: self.from.as_deref().map(|d| parse_date(Some(d))).transpose()?,
            date_to: self.to.as_deref().map(|d| parse_date(Some(d))).transpose()?,
            kind,
            fund_id: self
                .fund
                .as_deref()
                .map(|f| FundService::new(storage).resolve(f).map(|f| f.id))
                .transpose()?,
            expense_type_id: self
                .expense_type
                .as_deref()
                .map(|t| ExpenseTypeService::new(storage).resolve(t).map(|t| t.id))
                .transpose()?,
            min_amount: self.min.as_deref().map(parse_money).transpose()?,
            max_amount: self.max.as_deref().map(parse_money).transpose()?,
        })
    }
}

/// Print the filtered movement ledger
pub fn handle_movements_command(storage: &Storage, args: MovementArgs) -> ExpenseResult<()> {
    let report = MovementReport::generate(storage, &args.to_filter(storage)?)?;
    println!("{}", format_movement_list(&report.movements));
    Ok(())
}
