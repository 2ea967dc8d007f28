//! Expense and deposit formatting

use std::collections::HashMap;

use tabled::Tabled;

use crate::models::{Deposit, ExpenseHeader, ExpenseType, FundId, MonetaryFund, Money};
use crate::reports::budget_comparison::{truncate, UNKNOWN_CATEGORY};
use crate::reports::movements::UNKNOWN_FUND;
use crate::services::ExpenseWithDetails;

use super::{or_dash, render_table};

fn fund_names(funds: &[MonetaryFund]) -> HashMap<FundId, &str> {
    funds.iter().map(|f| (f.id, f.name.as_str())).collect()
}

fn fund_name<'a>(names: &HashMap<FundId, &'a str>, id: FundId) -> &'a str {
    names.get(&id).copied().unwrap_or(UNKNOWN_FUND)
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Commerce")]
    commerce: String,
    #[tabled(rename = "Document")]
    document: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format expense headers as a table
pub fn format_expense_list(headers: &[ExpenseHeader], funds: &[MonetaryFund]) -> String {
    if headers.is_empty() {
        return "No expenses found.".to_string();
    }

    let names = fund_names(funds);
    let rows = headers
        .iter()
        .map(|h| ExpenseRow {
            date: h.date.format("%Y-%m-%d").to_string(),
            commerce: truncate(&h.commerce_name, 30),
            document: match &h.document_number {
                Some(number) => format!("{} {}", h.document_type, number),
                None => h.document_type.to_string(),
            },
            total: h.total.to_string(),
            fund: fund_name(&names, h.monetary_fund_id).to_string(),
            id: h.id.to_string(),
        })
        .collect();

    let total: Money = headers.iter().map(|h| h.total).sum();
    format!("{}\nTotal: {}", render_table(rows, &[3]), total)
}

/// Format an expense with its detail lines
pub fn format_expense_details(
    expense: &ExpenseWithDetails,
    funds: &[MonetaryFund],
    types: &[ExpenseType],
) -> String {
    let header = &expense.header;
    let names = fund_names(funds);
    let type_names: HashMap<_, _> = types.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", header.commerce_name));
    output.push_str(&format!("  ID:         {}\n", header.id));
    output.push_str(&format!("  Date:       {}\n", header.date.format("%Y-%m-%d")));
    output.push_str(&format!(
        "  Fund:       {}\n",
        fund_name(&names, header.monetary_fund_id)
    ));
    output.push_str(&format!("  Document:   {}\n", header.document_type));
    if let Some(number) = &header.document_number {
        output.push_str(&format!("  Number:     {}\n", number));
    }
    if !header.observations.is_empty() {
        output.push_str(&format!("  Notes:      {}\n", header.observations));
    }

    output.push('\n');
    for detail in &expense.details {
        let category = type_names
            .get(&detail.expense_type_id)
            .copied()
            .unwrap_or(UNKNOWN_CATEGORY);
        output.push_str(&format!(
            "  {:>2}. {:<20} {:>12}  {}\n",
            detail.line + 1,
            truncate(category, 20),
            detail.amount,
            detail.description.as_deref().unwrap_or("")
        ));
    }
    output.push_str(&format!("  {:<24} {:>12}\n", "Total", header.total));

    output
}

#[derive(Tabled)]
struct DepositRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Fund")]
    fund: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Reference")]
    reference: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format deposits as a table
pub fn format_deposit_list(deposits: &[Deposit], funds: &[MonetaryFund]) -> String {
    if deposits.is_empty() {
        return "No deposits found.".to_string();
    }

    let names = fund_names(funds);
    let rows = deposits
        .iter()
        .map(|d| DepositRow {
            date: d.date.format("%Y-%m-%d").to_string(),
            amount: d.amount.to_string(),
            fund: fund_name(&names, d.monetary_fund_id).to_string(),
            description: or_dash(d.description.as_deref()),
            reference: or_dash(d.reference_number.as_deref()),
            id: d.id.to_string(),
        })
        .collect();

    let total: Money = deposits.iter().map(|d| d.amount).sum();
    format!("{}\nTotal: {}", render_table(rows, &[1]), total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, ExpenseDetail, FundType};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_expense_details_lists_lines() {
        let fund = MonetaryFund::new("Checking", FundType::Bank, Money::zero());
        let food = ExpenseType::new("001", "Food");

        let mut header = ExpenseHeader::new(date(), fund.id, "Market", DocumentType::Invoice);
        header.document_number = Some("F-12".into());
        header.total = Money::from_cents(4200);
        let detail = ExpenseDetail::new(header.id, food.id, Money::from_cents(4200));

        let expense = ExpenseWithDetails {
            header,
            details: vec![detail],
        };

        let output = format_expense_details(&expense, &[fund], &[food]);
        assert!(output.contains("Expense: Market"));
        assert!(output.contains("Checking"));
        assert!(output.contains("F-12"));
        assert!(output.contains("Food"));
        assert!(output.contains("$42.00"));
    }

    #[test]
    fn test_deposit_list_unknown_fund() {
        let deposit = Deposit::new(date(), FundId::new(), Money::from_units(10));
        let output = format_deposit_list(&[deposit], &[]);
        assert!(output.contains(UNKNOWN_FUND));
        assert!(output.contains("Total: $10.00"));
    }
}
