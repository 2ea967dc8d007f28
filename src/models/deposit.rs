//! Deposit model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{DepositId, FundId};
use super::money::Money;

/// Money added to a fund
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deposit {
    pub id: DepositId,

    pub date: NaiveDate,

    pub monetary_fund_id: FundId,

    /// Always positive
    pub amount: Money,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub reference_number: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Deposit {
    pub fn new(date: NaiveDate, monetary_fund_id: FundId, amount: Money) -> Self {
        Self {
            id: DepositId::new(),
            date,
            monetary_fund_id,
            amount,
            description: None,
            reference_number: None,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DepositValidationError> {
        if !self.amount.is_positive() {
            return Err(DepositValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.amount)
    }
}

/// Validation errors for deposits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositValidationError {
    NonPositiveAmount(Money),
}

impl fmt::Display for DepositValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Deposit amount must be greater than zero, got {}", amount)
            }
        }
    }
}

impl std::error::Error for DepositValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let deposit = Deposit::new(date, FundId::new(), Money::from_units(100));
        assert!(deposit.validate().is_ok());

        let negative = Deposit::new(date, FundId::new(), Money::from_units(-5));
        assert_eq!(
            negative.validate(),
            Err(DepositValidationError::NonPositiveAmount(Money::from_units(-5)))
        );
    }
}
