//! Expense collections (expense_headers.json, expense_details.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::{
    BudgetMonth, EntityId, ExpenseDetail, ExpenseDetailId, ExpenseHeader, ExpenseHeaderId,
    ExpenseTypeId, FundId,
};

use super::collection::{Collection, Record};

impl Record for ExpenseHeader {
    type Id = ExpenseHeaderId;
    const ENTITY: &'static str = "Expense";

    fn id(&self) -> ExpenseHeaderId {
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

impl Record for ExpenseDetail {
    type Id = ExpenseDetailId;
    const ENTITY: &'static str = "Expense detail";

    fn id(&self) -> ExpenseDetailId {
        self.id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.expense_header_id
            .as_uuid()
            .cmp(other.expense_header_id.as_uuid())
            .then_with(|| self.line.cmp(&other.line))
    }
}

impl Collection<ExpenseHeader> {
    pub fn in_month(&self, month: BudgetMonth) -> Result<Vec<ExpenseHeader>, ExpenseError> {
        self.filter(|h| month.contains(h.date))
    }

    pub fn references_fund(&self, fund_id: FundId) -> Result<bool, ExpenseError> {
        self.any(|h| h.monetary_fund_id == fund_id)
    }
}

impl Collection<ExpenseDetail> {
    /// Detail rows of one header, in line order
    pub fn by_header(&self, header_id: ExpenseHeaderId) -> Result<Vec<ExpenseDetail>, ExpenseError> {
        self.filter(|d| d.expense_header_id == header_id)
    }

    /// Remove every detail row of a header
    pub fn delete_by_header(&self, header_id: ExpenseHeaderId) -> Result<usize, ExpenseError> {
        self.delete_where(|d| d.expense_header_id == header_id)
    }

    pub fn references_type(&self, expense_type_id: ExpenseTypeId) -> Result<bool, ExpenseError> {
        self.any(|d| d.expense_type_id == expense_type_id)
    }
}
