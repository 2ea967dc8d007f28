//! Fund balance maintenance
//!
//! Deposits credit their fund and expenses debit theirs. Every create, edit
//! and delete goes through here so a fund balance always equals its opening
//! balance plus applied deposits minus applied expense totals.

use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{FundId, MonetaryFund, Money};
use crate::storage::Storage;

/// A signed amount a record contributes to one fund
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundEffect {
    pub fund_id: FundId,
    pub amount: Money,
}

impl FundEffect {
    /// A deposit adds its amount
    pub fn credit(fund_id: FundId, amount: Money) -> Self {
        Self { fund_id, amount }
    }

    /// An expense removes its total
    pub fn debit(fund_id: FundId, amount: Money) -> Self {
        Self {
            fund_id,
            amount: -amount,
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            fund_id: self.fund_id,
            amount: -self.amount,
        }
    }
}

/// Service that keeps fund balances in step with deposits and expenses.
///
/// Callers `plan` the new balances before writing their own record, then
/// `commit` them, so a rejected change leaves every file untouched.
pub struct BalanceService<'a> {
    storage: &'a Storage,
}

impl<'a> BalanceService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Fetch a fund or fail with `NotFound`
    pub fn require_fund(&self, fund_id: FundId) -> ExpenseResult<MonetaryFund> {
        self.storage
            .funds
            .get(fund_id)?
            .ok_or_else(|| ExpenseError::fund_not_found(fund_id.to_string()))
    }

    /// Compute fund balances with `effects` applied, without writing.
    ///
    /// Effects on the same fund are netted first. Every fund must exist and
    /// every resulting balance must fit, otherwise nothing is returned.
    /// Funds whose net change is zero are checked but left out.
    pub fn plan(&self, effects: &[FundEffect]) -> ExpenseResult<Vec<MonetaryFund>> {
        let mut net: Vec<(FundId, Money)> = Vec::with_capacity(effects.len());
        for effect in effects {
            match net.iter_mut().find(|(id, _)| *id == effect.fund_id) {
                Some((_, amount)) => {
                    *amount = amount
                        .checked_add(effect.amount)
                        .ok_or_else(|| out_of_range(effect.fund_id))?;
                }
                None => net.push((effect.fund_id, effect.amount)),
            }
        }

        let mut funds = Vec::with_capacity(net.len());
        for (fund_id, delta) in net {
            let mut fund = self.require_fund(fund_id)?;
            if delta.is_zero() {
                continue;
            }
            fund.apply(delta).map_err(|e| {
                warn!(fund = %fund_id, delta = %delta, "fund balance change rejected");
                ExpenseError::Validation(format!("{}: {}", fund.name, e))
            })?;
            funds.push(fund);
        }

        Ok(funds)
    }

    /// Persist balances produced by `plan`
    pub fn commit(&self, funds: Vec<MonetaryFund>) -> ExpenseResult<()> {
        if funds.is_empty() {
            return Ok(());
        }

        for fund in funds {
            info!(fund = %fund.id, balance = %fund.balance, "fund balance adjusted");
            self.storage.funds.upsert(fund)?;
        }
        self.storage.funds.save()
    }

    /// Add a signed delta to a fund balance and persist it
    pub fn apply_delta(&self, fund_id: FundId, delta: Money) -> ExpenseResult<MonetaryFund> {
        let funds = self.plan(&[FundEffect {
            fund_id,
            amount: delta,
        }])?;
        self.commit(funds)?;
        self.require_fund(fund_id)
    }

    pub fn apply(&self, effect: FundEffect) -> ExpenseResult<MonetaryFund> {
        self.apply_delta(effect.fund_id, effect.amount)
    }

    pub fn reverse(&self, effect: FundEffect) -> ExpenseResult<MonetaryFund> {
        self.apply(effect.reversed())
    }

    /// Replace a previously applied effect with a new one.
    ///
    /// On the same fund only the difference is applied. Across funds the old
    /// fund gets the reversal and the new fund the new effect.
    pub fn reapply(&self, old: FundEffect, new: FundEffect) -> ExpenseResult<()> {
        let funds = self.plan(&[old.reversed(), new])?;
        self.commit(funds)
    }
}

fn out_of_range(fund_id: FundId) -> ExpenseError {
    ExpenseError::Validation(format!("Fund balance would be out of range: {}", fund_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::FundType;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn add_fund(storage: &Storage, name: &str, units: i64) -> FundId {
        let fund = MonetaryFund::new(name, FundType::Bank, Money::from_units(units));
        let id = fund.id;
        storage.funds.upsert(fund).unwrap();
        id
    }

    fn balance(storage: &Storage, id: FundId) -> Money {
        storage.funds.get(id).unwrap().unwrap().balance
    }

    #[test]
    fn test_apply_delta_persists() {
        let (temp_dir, storage) = create_test_storage();
        let fund = add_fund(&storage, "Checking", 1000);
        let service = BalanceService::new(&storage);

        service.apply_delta(fund, Money::from_units(200)).unwrap();
        assert_eq!(balance(&storage, fund), Money::from_units(1200));

        let reopened =
            Storage::open(ExpensePaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(balance(&reopened, fund), Money::from_units(1200));
    }

    #[test]
    fn test_apply_then_reverse_restores_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let fund = add_fund(&storage, "Checking", 1000);
        let service = BalanceService::new(&storage);

        let effect = FundEffect::debit(fund, Money::from_cents(4550));
        service.apply(effect).unwrap();
        assert_eq!(balance(&storage, fund), Money::from_cents(95450));

        service.reverse(effect).unwrap();
        assert_eq!(balance(&storage, fund), Money::from_units(1000));
    }

    #[test]
    fn test_reapply_same_fund_applies_difference() {
        let (_temp_dir, storage) = create_test_storage();
        let fund = add_fund(&storage, "Checking", 1000);
        let service = BalanceService::new(&storage);

        service
            .reapply(
                FundEffect::credit(fund, Money::from_units(100)),
                FundEffect::credit(fund, Money::from_units(150)),
            )
            .unwrap();
        assert_eq!(balance(&storage, fund), Money::from_units(1050));
    }

    #[test]
    fn test_reapply_across_funds() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = add_fund(&storage, "Checking", 1100);
        let cash = add_fund(&storage, "Cash", 500);
        let service = BalanceService::new(&storage);

        // a 100 deposit already applied to checking, moved to cash as 120
        service
            .reapply(
                FundEffect::credit(checking, Money::from_units(100)),
                FundEffect::credit(cash, Money::from_units(120)),
            )
            .unwrap();

        assert_eq!(balance(&storage, checking), Money::from_units(1000));
        assert_eq!(balance(&storage, cash), Money::from_units(620));
    }

    #[test]
    fn test_missing_fund_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = add_fund(&storage, "Checking", 1000);
        let service = BalanceService::new(&storage);

        let err = service
            .reapply(
                FundEffect::credit(checking, Money::from_units(100)),
                FundEffect::credit(FundId::new(), Money::from_units(100)),
            )
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(balance(&storage, checking), Money::from_units(1000));

        let err = service
            .apply_delta(FundId::new(), Money::from_units(1))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_plan_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = add_fund(&storage, "Checking", 1000);
        let service = BalanceService::new(&storage);

        let funds = service
            .plan(&[FundEffect::credit(checking, Money::from_units(50))])
            .unwrap();
        assert_eq!(funds.len(), 1);
        assert_eq!(funds[0].balance, Money::from_units(1050));
        assert_eq!(balance(&storage, checking), Money::from_units(1000));

        service.commit(funds).unwrap();
        assert_eq!(balance(&storage, checking), Money::from_units(1050));
    }

    #[test]
    fn test_out_of_range_balance_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let checking = add_fund(&storage, "Checking", 1000);
        let cash = add_fund(&storage, "Cash", 0);
        let service = BalanceService::new(&storage);
        let huge = Money::from_cents(i64::MAX - 100);

        let err = service.apply_delta(checking, huge).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance(&storage, checking), Money::from_units(1000));

        // the first fund would fit, the second would not
        let err = service
            .plan(&[
                FundEffect::credit(cash, Money::from_units(1)),
                FundEffect::credit(checking, huge),
            ])
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(balance(&storage, cash), Money::zero());
    }
}
