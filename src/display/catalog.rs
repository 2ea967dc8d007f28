//! Expense type and monetary fund formatting

use tabled::Tabled;

use crate::models::{ExpenseType, MonetaryFund, Money};

use super::{or_dash, render_table};

#[derive(Tabled)]
struct ExpenseTypeRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format expense types as a table
pub fn format_expense_type_list(types: &[ExpenseType]) -> String {
    if types.is_empty() {
        return "No expense types found.".to_string();
    }

    let rows = types
        .iter()
        .map(|t| ExpenseTypeRow {
            code: t.code.clone(),
            name: t.name.clone(),
            description: or_dash(t.description.as_deref()),
            id: t.id.to_string(),
        })
        .collect();

    render_table(rows, &[])
}

#[derive(Tabled)]
struct FundRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    fund_type: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "ID")]
    id: String,
}

/// Format funds as a table followed by the total balance
pub fn format_fund_list(funds: &[MonetaryFund]) -> String {
    if funds.is_empty() {
        return "No monetary funds found.".to_string();
    }

    let rows = funds
        .iter()
        .map(|f| FundRow {
            name: f.name.clone(),
            fund_type: f.fund_type.to_string(),
            balance: f.balance.to_string(),
            bank: or_dash(f.bank_name.as_deref()),
            id: f.id.to_string(),
        })
        .collect();

    let total: Money = funds.iter().map(|f| f.balance).sum();
    format!("{}\nTotal balance: {}", render_table(rows, &[2]), total)
}

/// Format a single fund's details
pub fn format_fund_details(fund: &MonetaryFund) -> String {
    let mut output = String::new();

    output.push_str(&format!("Fund: {}\n", fund.name));
    output.push_str(&format!("  Type:           {}\n", fund.fund_type));
    output.push_str(&format!("  ID:             {}\n", fund.id));
    output.push_str(&format!("  Balance:        {}\n", fund.balance));

    if let Some(bank) = &fund.bank_name {
        output.push_str(&format!("  Bank:           {}\n", bank));
    }
    if let Some(account) = &fund.account_number {
        output.push_str(&format!("  Account number: {}\n", account));
    }

    output.push_str(&format!(
        "  Created:        {}\n",
        fund.created_at.format("%Y-%m-%d")
    ));

    output
}
