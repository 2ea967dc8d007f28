//! Budget collection (budgets.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::{Budget, BudgetId, BudgetMonth, ExpenseTypeId, UserId};

use super::collection::{Collection, Record};

impl Record for Budget {
    type Id = BudgetId;
    const ENTITY: &'static str = "Budget";

    fn id(&self) -> BudgetId {
        self.id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.month
            .cmp(&other.month)
            .then_with(|| self.created_at.cmp(&other.created_at))
    }
}

impl Collection<Budget> {
    /// The budget holding a (user, type, month) slot, ignoring `exclude_id`
    pub fn find_slot(
        &self,
        user_id: UserId,
        expense_type_id: ExpenseTypeId,
        month: BudgetMonth,
        exclude_id: Option<BudgetId>,
    ) -> Result<Option<Budget>, ExpenseError> {
        Ok(self
            .filter(|b| b.occupies(user_id, expense_type_id, month) && Some(b.id) != exclude_id)?
            .into_iter()
            .next())
    }

    /// A user's budgets, optionally limited to one month
    pub fn for_user(
        &self,
        user_id: UserId,
        month: Option<BudgetMonth>,
    ) -> Result<Vec<Budget>, ExpenseError> {
        self.filter(|b| b.user_id == user_id && month.map_or(true, |m| b.month == m))
    }

    /// Every budget for a month, across users
    pub fn in_month(&self, month: BudgetMonth) -> Result<Vec<Budget>, ExpenseError> {
        self.filter(|b| b.month == month)
    }

    pub fn references_type(&self, expense_type_id: ExpenseTypeId) -> Result<bool, ExpenseError> {
        self.any(|b| b.expense_type_id == expense_type_id)
    }
}
