//! Movement ledger formatting

use tabled::Tabled;

use crate::reports::{Movement, MovementKind, MovementTotals};

use super::render_table;

#[derive(Tabled)]
struct MovementRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Category")]
    category: String,
}

/// Format movements as a table followed by their totals
pub fn format_movement_list(movements: &[Movement]) -> String {
    if movements.is_empty() {
        return "No movements found.".to_string();
    }

    let rows = movements
        .iter()
        .map(|m| MovementRow {
            date: m.date.format("%Y-%m-%d").to_string(),
            kind: match m.kind {
                MovementKind::Expense { .. } => "Expense",
                MovementKind::Deposit => "Deposit",
            },
            description: m.description.clone(),
            amount: m.amount.to_string(),
            fund: m.fund_name.clone(),
            category: m
                .kind
                .category()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    let totals = MovementTotals::from(movements);
    format!(
        "{}\n{} movements  deposits {}  expenses {}  net {}",
        render_table(rows, &[3]),
        totals.count,
        totals.deposits,
        totals.expenses,
        totals.net
    )
}
