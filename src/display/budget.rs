//! Budget formatting

use std::collections::HashMap;

use tabled::Tabled;

use crate::models::{Budget, ExpenseType, Money};
use crate::reports::budget_comparison::UNKNOWN_CATEGORY;

use super::render_table;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Expense type")]
    expense_type: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format budgets as a table, naming each by its expense type
pub fn format_budget_list(budgets: &[Budget], types: &[ExpenseType]) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let names: HashMap<_, _> = types.iter().map(|t| (t.id, t.name.as_str())).collect();

    let rows = budgets
        .iter()
        .map(|b| BudgetRow {
            month: b.month.to_string(),
            expense_type: names
                .get(&b.expense_type_id)
                .copied()
                .unwrap_or(UNKNOWN_CATEGORY)
                .to_string(),
            amount: b.budget_amount.to_string(),
            id: b.id.to_string(),
        })
        .collect();

    let total: Money = budgets.iter().map(|b| b.budget_amount).sum();
    format!("{}\nTotal budgeted: {}", render_table(rows, &[2]), total)
}
