//! Monetary fund model
//!
//! A place money lives: a bank account or a cash box. Deposits credit a
//! fund and expenses debit it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::FundId;
use super::money::Money;

/// Kind of monetary fund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundType {
    #[default]
    Bank,
    Cash,
}

impl FundType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank" | "banco" => Some(Self::Bank),
            "cash" | "efectivo" | "caja" => Some(Self::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank => f.pad("Bank"),
            Self::Cash => f.pad("Cash"),
        }
    }
}

/// A monetary fund with a running balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonetaryFund {
    pub id: FundId,

    pub name: String,

    #[serde(rename = "type")]
    pub fund_type: FundType,

    /// Current balance: opening balance plus applied deposits minus applied expenses
    pub balance: Money,

    #[serde(default)]
    pub account_number: Option<String>,

    #[serde(default)]
    pub bank_name: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl MonetaryFund {
    pub fn new(name: impl Into<String>, fund_type: FundType, opening_balance: Money) -> Self {
        Self {
            id: FundId::new(),
            name: name.into(),
            fund_type,
            balance: opening_balance,
            account_number: None,
            bank_name: None,
            created_at: Utc::now(),
        }
    }

    /// Add a signed amount to the balance.
    ///
    /// The balance is left unchanged when the result would not fit.
    pub fn apply(&mut self, delta: Money) -> Result<(), FundValidationError> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or(FundValidationError::BalanceOutOfRange)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FundValidationError> {
        if self.name.trim().is_empty() {
            return Err(FundValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(FundValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

impl fmt::Display for MonetaryFund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.fund_type)
    }
}

/// Validation errors for funds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FundValidationError {
    EmptyName,
    NameTooLong(usize),
    BalanceOutOfRange,
}

impl fmt::Display for FundValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Fund name cannot be empty"),
            Self::NameTooLong(len) => write!(f, "Fund name too long ({} chars, max 100)", len),
            Self::BalanceOutOfRange => write!(f, "Fund balance would be out of range"),
        }
    }
}

impl std::error::Error for FundValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta() {
        let mut fund = MonetaryFund::new("Checking", FundType::Bank, Money::from_units(1000));
        fund.apply(Money::from_units(200)).unwrap();
        fund.apply(-Money::from_units(50)).unwrap();
        assert_eq!(fund.balance, Money::from_units(1150));
    }

    #[test]
    fn test_apply_out_of_range_leaves_balance() {
        let near_max = Money::from_cents(i64::MAX - 1);
        let mut fund = MonetaryFund::new("Checking", FundType::Bank, near_max);
        assert_eq!(
            fund.apply(Money::from_cents(2)),
            Err(FundValidationError::BalanceOutOfRange)
        );
        assert_eq!(fund.balance, near_max);
    }

    #[test]
    fn test_fund_type_parse() {
        assert_eq!(FundType::parse("bank"), Some(FundType::Bank));
        assert_eq!(FundType::parse("CASH"), Some(FundType::Cash));
        assert_eq!(FundType::parse("crypto"), None);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let fund = MonetaryFund::new("Petty Cash", FundType::Cash, Money::from_units(500));
        let json = serde_json::to_value(&fund).unwrap();
        assert_eq!(json["type"], "cash");
        assert_eq!(json["balance"], 50000);
    }

    #[test]
    fn test_validation() {
        let fund = MonetaryFund::new("", FundType::Bank, Money::zero());
        assert_eq!(fund.validate(), Err(FundValidationError::EmptyName));
    }
}
