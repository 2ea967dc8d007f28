//! Dashboard summary for a month

use crate::auth::Session;
use crate::error::ExpenseResult;
use crate::models::{BudgetMonth, Money};
use crate::storage::Storage;

/// Headline figures across funds, expenses, deposits and budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub month: BudgetMonth,
    pub total_balance: Money,
    pub fund_count: usize,
    pub month_expenses: Money,
    pub month_expense_count: usize,
    pub month_deposits: Money,
    pub month_deposit_count: usize,
    /// Budgets of the session's user only
    pub month_budgeted: Money,
    pub month_budget_count: usize,
    pub total_expense_count: usize,
}

impl DashboardSummary {
    pub fn generate(storage: &Storage, session: &Session, month: BudgetMonth) -> ExpenseResult<Self> {
        let funds = storage.funds.get_all()?;
        let expenses = storage.expense_headers.in_month(month)?;
        let deposits = storage.deposits.in_month(month)?;
        let budgets = storage.budgets.for_user(session.user_id, Some(month))?;

        Ok(Self {
            month,
            total_balance: funds.iter().map(|f| f.balance).sum(),
            fund_count: funds.len(),
            month_expenses: expenses.iter().map(|e| e.total).sum(),
            month_expense_count: expenses.len(),
            month_deposits: deposits.iter().map(|d| d.amount).sum(),
            month_deposit_count: deposits.len(),
            month_budgeted: budgets.iter().map(|b| b.budget_amount).sum(),
            month_budget_count: budgets.len(),
            total_expense_count: storage.expense_headers.count()?,
        })
    }

    /// Deposits minus expenses for the month
    pub fn month_net(&self) -> Money {
        self.month_deposits - self.month_expenses
    }

    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Dashboard: {}\n", self.month));
        output.push_str(&"=".repeat(44));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>14}  ({} funds)\n",
            "Total balance", self.total_balance, self.fund_count
        ));
        output.push_str(&format!(
            "{:<24} {:>14}  ({})\n",
            "Expenses this month", self.month_expenses, self.month_expense_count
        ));
        output.push_str(&format!(
            "{:<24} {:>14}  ({})\n",
            "Deposits this month", self.month_deposits, self.month_deposit_count
        ));
        output.push_str(&format!("{:<24} {:>14}\n", "Net this month", self.month_net()));
        output.push_str(&format!(
            "{:<24} {:>14}  ({})\n",
            "Budgeted this month", self.month_budgeted, self.month_budget_count
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Expenses recorded", self.total_expense_count
        ));

        output
    }
}
