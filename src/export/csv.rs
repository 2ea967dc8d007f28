//! CSV export of the movement ledger
//!
//! Columns and labels follow the spreadsheet layout users already import:
//! `Fecha,Tipo,Descripción,Monto,Fondo,Categoría`.

use std::io::Write;

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use tracing::info;

use crate::error::ExpenseResult;
use crate::reports::{Movement, MovementKind};

/// Header row of the movements file
pub const MOVEMENT_HEADERS: [&str; 6] = ["Fecha", "Tipo", "Descripción", "Monto", "Fondo", "Categoría"];

const EXPENSE_LABEL: &str = "Gasto";
const DEPOSIT_LABEL: &str = "Depósito";
const NO_CATEGORY: &str = "N/A";

/// Default file name for an export made on `date`
pub fn default_export_filename(date: NaiveDate) -> String {
    format!("movimientos_{}.csv", date.format("%Y-%m-%d"))
}

/// Write movements as CSV, one row each, in the order given
pub fn export_movements_csv<W: Write>(movements: &[Movement], writer: W) -> ExpenseResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(writer);

    csv_writer.write_record(MOVEMENT_HEADERS)?;

    for movement in movements {
        let (kind, category) = match &movement.kind {
            MovementKind::Expense { category } => (
                EXPENSE_LABEL,
                category.as_ref().map(|c| c.name.as_str()).unwrap_or(NO_CATEGORY),
            ),
            MovementKind::Deposit => (DEPOSIT_LABEL, NO_CATEGORY),
        };

        let date = movement.date.format("%Y-%m-%d").to_string();
        let amount = movement.amount.format_plain();

        csv_writer.write_record([
            date.as_str(),
            kind,
            movement.description.as_str(),
            amount.as_str(),
            movement.fund_name.as_str(),
            category,
        ])?;
    }

    csv_writer.flush()?;

    info!(rows = movements.len(), "exported movements to CSV");
    Ok(())
}
