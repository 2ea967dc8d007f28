//! Expense CLI commands

use clap::Subcommand;

use crate::display::{format_expense_details, format_expense_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::DocumentType;
use crate::services::{DetailInput, ExpenseInput, ExpenseService, ExpenseTypeService, FundService};
use crate::storage::Storage;

use super::{parse_date, parse_money, parse_month};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense paid from a fund
    Add {
        /// Fund name or ID
        fund: String,
        /// Commerce where the money was spent
        commerce: String,
        /// Detail line as TYPE:AMOUNT[:DESCRIPTION], repeatable
        #[arg(short, long = "line", required = true)]
        lines: Vec<String>,
        /// Date (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// Document type (receipt, invoice, other)
        #[arg(long, default_value = "receipt")]
        document: String,
        /// Document number
        #[arg(long)]
        number: Option<String>,
        /// Observations
        #[arg(long)]
        notes: Option<String>,
    },
    /// List expenses
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show an expense with its detail lines
    Show {
        /// Expense ID
        expense: String,
    },
    /// Edit an expense; given lines replace all existing ones
    Edit {
        /// Expense ID
        expense: String,
        /// New fund
        #[arg(short, long)]
        fund: Option<String>,
        /// New commerce name
        #[arg(short, long)]
        commerce: Option<String>,
        /// Replacement detail lines as TYPE:AMOUNT[:DESCRIPTION]
        #[arg(short, long = "line")]
        lines: Vec<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New document type
        #[arg(long)]
        document: Option<String>,
        /// New document number (empty to clear)
        #[arg(long)]
        number: Option<String>,
        /// New observations
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an expense and give its total back to the fund
    Delete {
        /// Expense ID
        expense: String,
    },
}

fn parse_document_type(input: &str) -> ExpenseResult<DocumentType> {
    DocumentType::parse(input).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Invalid document type: '{}'. Valid types: receipt, invoice, other",
            input
        ))
    })
}

/// Parse a `TYPE:AMOUNT[:DESCRIPTION]` detail line
fn parse_line(types: &ExpenseTypeService, line: &str) -> ExpenseResult<DetailInput> {
    let mut parts = line.splitn(3, ':');
    let (expense_type, amount) = match (parts.next(), parts.next()) {
        (Some(t), Some(a)) if !t.trim().is_empty() => (t.trim(), a.trim()),
        _ => {
            return Err(ExpenseError::Validation(format!(
                "Invalid line '{}'. Use TYPE:AMOUNT[:DESCRIPTION], e.g. 001:25.50:lunch",
                line
            )))
        }
    };

    Ok(DetailInput {
        expense_type_id: types.resolve(expense_type)?.id,
        amount: parse_money(amount)?,
        description: parts.next().map(|d| d.trim().to_string()),
    })
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let funds = FundService::new(storage);
    let types = ExpenseTypeService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            fund,
            commerce,
            lines,
            date,
            document,
            number,
            notes,
        } => {
            let details = lines
                .iter()
                .map(|line| parse_line(&types, line))
                .collect::<ExpenseResult<Vec<_>>>()?;

            let expense = service.create(ExpenseInput {
                date: parse_date(date.as_deref())?,
                fund_id: funds.resolve(&fund)?.id,
                commerce_name: commerce,
                document_type: parse_document_type(&document)?,
                document_number: number,
                observations: notes.unwrap_or_default(),
                details,
            })?;

            println!(
                "Recorded expense: {} {} ({} lines)",
                expense.header.commerce_name,
                expense.header.total,
                expense.details.len()
            );
            println!("  ID: {}", expense.header.id);
        }

        ExpenseCommands::List { month } => {
            let mut headers = service.list()?;
            if let Some(month) = month {
                let month = parse_month(Some(&month))?;
                headers.retain(|h| month.contains(h.date));
            }
            println!("{}", format_expense_list(&headers, &funds.list()?));
        }

        ExpenseCommands::Show { expense } => {
            let found = service.resolve(&expense)?;
            let expense = service.get_with_details(found.id)?;
            print!(
                "{}",
                format_expense_details(&expense, &funds.list()?, &types.list()?)
            );
        }

        ExpenseCommands::Edit {
            expense,
            fund,
            commerce,
            lines,
            date,
            document,
            number,
            notes,
        } => {
            let found = service.resolve(&expense)?;
            let existing = service.get_with_details(found.id)?;
            let header = existing.header;

            let details = if lines.is_empty() {
                existing
                    .details
                    .into_iter()
                    .map(|d| DetailInput {
                        expense_type_id: d.expense_type_id,
                        amount: d.amount,
                        description: d.description,
                    })
                    .collect()
            } else {
                lines
                    .iter()
                    .map(|line| parse_line(&types, line))
                    .collect::<ExpenseResult<Vec<_>>>()?
            };

            let input = ExpenseInput {
                date: match date {
                    Some(d) => parse_date(Some(&d))?,
                    None => header.date,
                },
                fund_id: match fund {
                    Some(f) => funds.resolve(&f)?.id,
                    None => header.monetary_fund_id,
                },
                commerce_name: commerce.unwrap_or(header.commerce_name),
                document_type: match document {
                    Some(d) => parse_document_type(&d)?,
                    None => header.document_type,
                },
                document_number: number.or(header.document_number),
                observations: notes.unwrap_or(header.observations),
                details,
            };

            let updated = service.update(header.id, input)?;
            println!(
                "Updated expense: {} {}",
                updated.header.commerce_name, updated.header.total
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = service.resolve(&expense)?;
            let deleted = service.delete(found.id)?;
            println!(
                "Deleted expense: {} {}",
                deleted.commerce_name, deleted.total
            );
        }
    }

    Ok(())
}
