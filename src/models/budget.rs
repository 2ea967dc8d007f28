//! Budget model
//!
//! A planned amount for one expense type in one month, owned by a user.
//! The (user, expense type, month) triple is unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, ExpenseTypeId, UserId};
use super::money::Money;
use super::month::BudgetMonth;

/// A monthly budget for one expense type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub user_id: UserId,

    pub expense_type_id: ExpenseTypeId,

    pub month: BudgetMonth,

    pub budget_amount: Money,

    /// Informational only; reports recompute spending from expense details
    #[serde(default)]
    pub spent_amount: Money,

    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        user_id: UserId,
        expense_type_id: ExpenseTypeId,
        month: BudgetMonth,
        budget_amount: Money,
    ) -> Self {
        Self {
            id: BudgetId::new(),
            user_id,
            expense_type_id,
            month,
            budget_amount,
            spent_amount: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Whether this budget occupies the given (user, type, month) slot
    pub fn occupies(&self, user_id: UserId, expense_type_id: ExpenseTypeId, month: BudgetMonth) -> bool {
        self.user_id == user_id && self.expense_type_id == expense_type_id && self.month == month
    }

    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.budget_amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month, self.budget_amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn march() -> BudgetMonth {
        BudgetMonth::parse("2024-03").unwrap()
    }

    #[test]
    fn test_new_budget() {
        let budget = Budget::new(
            UserId::new(),
            ExpenseTypeId::new(),
            march(),
            Money::from_units(200),
        );
        assert_eq!(budget.budget_amount.cents(), 20000);
        assert!(budget.spent_amount.is_zero());
        assert!(budget.validate().is_ok());
    }

    #[test]
    fn test_occupies() {
        let user = UserId::new();
        let food = ExpenseTypeId::new();
        let budget = Budget::new(user, food, march(), Money::from_units(200));

        assert!(budget.occupies(user, food, march()));
        assert!(!budget.occupies(user, food, march().next()));
        assert!(!budget.occupies(UserId::new(), food, march()));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let budget = Budget::new(
            UserId::new(),
            ExpenseTypeId::new(),
            march(),
            Money::from_cents(-1),
        );
        assert_eq!(budget.validate(), Err(BudgetValidationError::NegativeAmount));
    }

    #[test]
    fn test_month_serialized_as_string() {
        let budget = Budget::new(UserId::new(), ExpenseTypeId::new(), march(), Money::zero());
        let json = serde_json::to_value(&budget).unwrap();
        assert_eq!(json["month"], "2024-03");
    }
}
