//! Budget service
//!
//! Budgets belong to the logged-in user. Each user has at most one budget
//! per expense type and month.

use tracing::{info, warn};

use crate::auth::Session;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Budget, BudgetId, BudgetMonth, ExpenseTypeId, Money};
use crate::storage::Storage;

/// Changes to apply to a budget; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct BudgetUpdate {
    pub expense_type_id: Option<ExpenseTypeId>,
    pub month: Option<BudgetMonth>,
    pub amount: Option<Money>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        session: &Session,
        expense_type_id: ExpenseTypeId,
        month: BudgetMonth,
        amount: Money,
    ) -> ExpenseResult<Budget> {
        let budget = Budget::new(session.user_id, expense_type_id, month, amount);
        self.check(&budget)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        info!(
            budget = %budget.id,
            month = %budget.month,
            amount = %budget.budget_amount,
            "budget created"
        );
        Ok(budget)
    }

    /// A budget of the session's user
    pub fn get(&self, session: &Session, id: BudgetId) -> ExpenseResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .filter(|b| b.user_id == session.user_id)
            .ok_or_else(|| ExpenseError::budget_not_found(id.to_string()))
    }

    /// Resolve a user-typed budget id among the session user's budgets
    pub fn resolve(&self, session: &Session, identifier: &str) -> ExpenseResult<Budget> {
        self.storage
            .budgets
            .find_by_short_id(identifier)?
            .filter(|b| b.user_id == session.user_id)
            .ok_or_else(|| ExpenseError::budget_not_found(identifier))
    }

    /// The session user's budgets, optionally for one month
    pub fn list(&self, session: &Session, month: Option<BudgetMonth>) -> ExpenseResult<Vec<Budget>> {
        self.storage.budgets.for_user(session.user_id, month)
    }

    pub fn update(
        &self,
        session: &Session,
        id: BudgetId,
        changes: BudgetUpdate,
    ) -> ExpenseResult<Budget> {
        let mut budget = self.get(session, id)?;

        if let Some(expense_type_id) = changes.expense_type_id {
            budget.expense_type_id = expense_type_id;
        }
        if let Some(month) = changes.month {
            budget.month = month;
        }
        if let Some(amount) = changes.amount {
            budget.budget_amount = amount;
        }

        self.check(&budget)?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;

        info!(budget = %budget.id, "budget updated");
        Ok(budget)
    }

    pub fn delete(&self, session: &Session, id: BudgetId) -> ExpenseResult<Budget> {
        let budget = self.get(session, id)?;

        self.storage.budgets.delete(id)?;
        self.storage.budgets.save()?;

        info!(budget = %budget.id, "budget deleted");
        Ok(budget)
    }

    /// Amount, type existence and slot uniqueness
    fn check(&self, budget: &Budget) -> ExpenseResult<()> {
        budget
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let expense_type = self
            .storage
            .expense_types
            .get(budget.expense_type_id)?
            .ok_or_else(|| ExpenseError::expense_type_not_found(budget.expense_type_id.to_string()))?;

        let taken = self.storage.budgets.find_slot(
            budget.user_id,
            budget.expense_type_id,
            budget.month,
            Some(budget.id),
        )?;

        if taken.is_some() {
            warn!(month = %budget.month, "duplicate budget refused");
            return Err(ExpenseError::Duplicate {
                entity_type: "Budget",
                identifier: format!("{} {}", expense_type.name, budget.month),
            });
        }

        Ok(())
    }
}
