//! Monetary fund service
//!
//! Balances change through deposits and expenses; `set_balance` is the only
//! direct correction. Funds referenced by deposits or expenses cannot be
//! deleted.

use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{FundId, FundType, MonetaryFund, Money};
use crate::storage::Storage;

use super::non_empty;

/// Changes to apply to a fund; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct FundUpdate {
    pub name: Option<String>,
    pub fund_type: Option<FundType>,
    /// An empty string clears the account number
    pub account_number: Option<String>,
    /// An empty string clears the bank name
    pub bank_name: Option<String>,
}

/// Service for monetary fund management
pub struct FundService<'a> {
    storage: &'a Storage,
}

impl<'a> FundService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        fund_type: FundType,
        opening_balance: Money,
        account_number: Option<&str>,
        bank_name: Option<&str>,
    ) -> ExpenseResult<MonetaryFund> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation("Fund name cannot be empty".into()));
        }

        if self.storage.funds.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Monetary fund",
                identifier: name.to_string(),
            });
        }

        let mut fund = MonetaryFund::new(name, fund_type, opening_balance);
        fund.account_number = non_empty(account_number);
        fund.bank_name = non_empty(bank_name);

        fund.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.funds.upsert(fund.clone())?;
        self.storage.funds.save()?;

        info!(fund = %fund.id, name = %fund.name, balance = %fund.balance, "fund created");
        Ok(fund)
    }

    pub fn get(&self, id: FundId) -> ExpenseResult<Option<MonetaryFund>> {
        self.storage.funds.get(id)
    }

    /// Find a fund by name or id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<MonetaryFund>> {
        if let Some(fund) = self.storage.funds.get_by_name(identifier)? {
            return Ok(Some(fund));
        }

        self.storage.funds.find_by_short_id(identifier)
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<MonetaryFund> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::fund_not_found(identifier))
    }

    pub fn list(&self) -> ExpenseResult<Vec<MonetaryFund>> {
        self.storage.funds.get_all()
    }

    /// Sum of all fund balances
    pub fn total_balance(&self) -> ExpenseResult<Money> {
        self.storage.funds.total_balance()
    }

    pub fn update(&self, id: FundId, changes: FundUpdate) -> ExpenseResult<MonetaryFund> {
        let mut fund = self
            .storage
            .funds
            .get(id)?
            .ok_or_else(|| ExpenseError::fund_not_found(id.to_string()))?;

        if let Some(new_name) = changes.name.as_deref() {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(ExpenseError::Validation("Fund name cannot be empty".into()));
            }

            if self.storage.funds.name_exists(new_name, Some(id))? {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Monetary fund",
                    identifier: new_name.to_string(),
                });
            }

            fund.name = new_name.to_string();
        }

        if let Some(fund_type) = changes.fund_type {
            fund.fund_type = fund_type;
        }
        if let Some(account_number) = changes.account_number.as_deref() {
            fund.account_number = non_empty(Some(account_number));
        }
        if let Some(bank_name) = changes.bank_name.as_deref() {
            fund.bank_name = non_empty(Some(bank_name));
        }

        fund.validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.funds.upsert(fund.clone())?;
        self.storage.funds.save()?;

        info!(fund = %fund.id, "fund updated");
        Ok(fund)
    }

    /// Overwrite a balance by hand
    pub fn set_balance(&self, id: FundId, balance: Money) -> ExpenseResult<MonetaryFund> {
        let mut fund = self
            .storage
            .funds
            .get(id)?
            .ok_or_else(|| ExpenseError::fund_not_found(id.to_string()))?;

        let previous = fund.balance;
        fund.balance = balance;

        self.storage.funds.upsert(fund.clone())?;
        self.storage.funds.save()?;

        warn!(
            fund = %fund.id,
            previous = %previous,
            balance = %balance,
            "fund balance set manually"
        );
        Ok(fund)
    }

    pub fn delete(&self, id: FundId) -> ExpenseResult<MonetaryFund> {
        let fund = self
            .storage
            .funds
            .get(id)?
            .ok_or_else(|| ExpenseError::fund_not_found(id.to_string()))?;

        if self.storage.deposits.references_fund(id)?
            || self.storage.expense_headers.references_fund(id)?
        {
            warn!(fund = %fund.id, "refused to delete fund in use");
            return Err(ExpenseError::Validation(format!(
                "Fund '{}' has deposits or expenses and cannot be deleted",
                fund.name
            )));
        }

        self.storage.funds.delete(id)?;
        self.storage.funds.save()?;

        info!(fund = %fund.id, name = %fund.name, "fund deleted");
        Ok(fund)
    }
}
