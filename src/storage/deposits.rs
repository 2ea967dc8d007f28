//! Deposit collection (deposits.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::{BudgetMonth, Deposit, DepositId, FundId};

use super::collection::{Collection, Record};

impl Record for Deposit {
    type Id = DepositId;
    const ENTITY: &'static str = "Deposit";

    fn id(&self) -> DepositId {
        self.id
    }

    /// Newest first
    fn compare(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| other.created_at.cmp(&self.created_at))
    }
}

impl Collection<Deposit> {
    pub fn in_month(&self, month: BudgetMonth) -> Result<Vec<Deposit>, ExpenseError> {
        self.filter(|d| month.contains(d.date))
    }

    pub fn by_fund(&self, fund_id: FundId) -> Result<Vec<Deposit>, ExpenseError> {
        self.filter(|d| d.monetary_fund_id == fund_id)
    }

    pub fn references_fund(&self, fund_id: FundId) -> Result<bool, ExpenseError> {
        self.any(|d| d.monetary_fund_id == fund_id)
    }
}
