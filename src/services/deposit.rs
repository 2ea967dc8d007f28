//! Deposit service
//!
//! Every change to a deposit is mirrored on its fund balance.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Deposit, DepositId, FundId, Money};
use crate::storage::Storage;

use super::balance::{BalanceService, FundEffect};
use super::non_empty;

/// Data for a new or edited deposit
#[derive(Debug, Clone)]
pub struct DepositInput {
    pub date: NaiveDate,
    pub fund_id: FundId,
    pub amount: Money,
    pub description: Option<String>,
    pub reference_number: Option<String>,
}

fn effect_of(deposit: &Deposit) -> FundEffect {
    FundEffect::credit(deposit.monetary_fund_id, deposit.amount)
}

/// Service for deposit management
pub struct DepositService<'a> {
    storage: &'a Storage,
    balances: BalanceService<'a>,
}

impl<'a> DepositService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            balances: BalanceService::new(storage),
        }
    }

    pub fn create(&self, input: DepositInput) -> ExpenseResult<Deposit> {
        let mut deposit = Deposit::new(input.date, input.fund_id, input.amount);
        deposit.description = non_empty(input.description.as_deref());
        deposit.reference_number = non_empty(input.reference_number.as_deref());

        deposit
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        let funds = self.balances.plan(&[effect_of(&deposit)])?;

        self.storage.deposits.upsert(deposit.clone())?;
        self.storage.deposits.save()?;
        self.balances.commit(funds)?;

        info!(deposit = %deposit.id, amount = %deposit.amount, "deposit created");
        Ok(deposit)
    }

    pub fn get(&self, id: DepositId) -> ExpenseResult<Option<Deposit>> {
        self.storage.deposits.get(id)
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Deposit> {
        self.storage
            .deposits
            .find_by_short_id(identifier)?
            .ok_or_else(|| ExpenseError::deposit_not_found(identifier))
    }

    /// All deposits, newest first
    pub fn list(&self) -> ExpenseResult<Vec<Deposit>> {
        self.storage.deposits.get_all()
    }

    /// Sum of all deposit amounts
    pub fn total(&self) -> ExpenseResult<Money> {
        Ok(self.list()?.iter().map(|d| d.amount).sum())
    }

    /// Replace a deposit's data, moving its effect between funds if needed
    pub fn update(&self, id: DepositId, input: DepositInput) -> ExpenseResult<Deposit> {
        let existing = self
            .storage
            .deposits
            .get(id)?
            .ok_or_else(|| ExpenseError::deposit_not_found(id.to_string()))?;

        let mut deposit = existing.clone();
        deposit.date = input.date;
        deposit.monetary_fund_id = input.fund_id;
        deposit.amount = input.amount;
        deposit.description = non_empty(input.description.as_deref());
        deposit.reference_number = non_empty(input.reference_number.as_deref());

        deposit
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let funds = self
            .balances
            .plan(&[effect_of(&existing).reversed(), effect_of(&deposit)])?;

        self.storage.deposits.upsert(deposit.clone())?;
        self.storage.deposits.save()?;
        self.balances.commit(funds)?;

        info!(deposit = %deposit.id, amount = %deposit.amount, "deposit updated");
        Ok(deposit)
    }

    pub fn delete(&self, id: DepositId) -> ExpenseResult<Deposit> {
        let deposit = self
            .storage
            .deposits
            .get(id)?
            .ok_or_else(|| ExpenseError::deposit_not_found(id.to_string()))?;

        let funds = self.balances.plan(&[effect_of(&deposit).reversed()])?;

        self.storage.deposits.delete(id)?;
        self.storage.deposits.save()?;
        self.balances.commit(funds)?;

        info!(deposit = %deposit.id, "deposit deleted");
        Ok(deposit)
    }
}
