//! Monetary fund collection (monetary_funds.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::{FundId, MonetaryFund, Money};

use super::collection::{Collection, Record};

impl Record for MonetaryFund {
    type Id = FundId;
    const ENTITY: &'static str = "Monetary fund";

    fn id(&self) -> FundId {
        self.id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl Collection<MonetaryFund> {
    /// Find a fund by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<MonetaryFund>, ExpenseError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .filter(|f| f.name.to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    pub fn name_exists(&self, name: &str, exclude_id: Option<FundId>) -> Result<bool, ExpenseError> {
        let wanted = name.trim().to_lowercase();
        self.any(|f| f.name.to_lowercase() == wanted && Some(f.id) != exclude_id)
    }

    /// Sum of every fund balance
    pub fn total_balance(&self) -> Result<Money, ExpenseError> {
        Ok(self.get_all()?.iter().map(|f| f.balance).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FundType;
    use tempfile::TempDir;

    #[test]
    fn test_total_balance_and_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let funds: Collection<MonetaryFund> =
            Collection::new(temp_dir.path().join("monetary_funds.json"));

        let checking = MonetaryFund::new("Checking Account", FundType::Bank, Money::from_units(5000));
        let checking_id = checking.id;
        funds.upsert(checking).unwrap();
        funds
            .upsert(MonetaryFund::new("Petty Cash", FundType::Cash, Money::from_units(500)))
            .unwrap();

        assert_eq!(funds.total_balance().unwrap(), Money::from_units(5500));
        assert!(funds.name_exists("petty cash", None).unwrap());
        assert!(!funds.name_exists("checking account", Some(checking_id)).unwrap());
        assert_eq!(
            funds.get_by_name("CHECKING ACCOUNT").unwrap().unwrap().id,
            checking_id
        );
    }
}
