//! Expense models
//!
//! An expense is a header (date, fund, commerce, document) that owns one or
//! more detail rows, each charging an amount to an expense type. The header
//! total is always the sum of its detail amounts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{ExpenseDetailId, ExpenseHeaderId, ExpenseTypeId, FundId};
use super::money::Money;

/// Kind of document backing an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Receipt,
    Invoice,
    Other,
}

impl DocumentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "receipt" | "boleta" => Some(Self::Receipt),
            "invoice" | "factura" => Some(Self::Invoice),
            "other" | "otro" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Receipt => f.pad("Receipt"),
            Self::Invoice => f.pad("Invoice"),
            Self::Other => f.pad("Other"),
        }
    }
}

/// The header of an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseHeader {
    pub id: ExpenseHeaderId,

    pub date: NaiveDate,

    pub monetary_fund_id: FundId,

    /// Where the money was spent
    pub commerce_name: String,

    pub document_type: DocumentType,

    #[serde(default)]
    pub document_number: Option<String>,

    #[serde(default)]
    pub observations: String,

    /// Sum of the detail amounts
    pub total: Money,

    pub created_at: DateTime<Utc>,
}

impl ExpenseHeader {
    pub fn new(
        date: NaiveDate,
        monetary_fund_id: FundId,
        commerce_name: impl Into<String>,
        document_type: DocumentType,
    ) -> Self {
        Self {
            id: ExpenseHeaderId::new(),
            date,
            monetary_fund_id,
            commerce_name: commerce_name.into(),
            document_type,
            document_number: None,
            observations: String::new(),
            total: Money::zero(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.commerce_name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCommerce);
        }

        if self.commerce_name.len() > 200 {
            return Err(ExpenseValidationError::CommerceTooLong(
                self.commerce_name.len(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for ExpenseHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.commerce_name, self.total)
    }
}

/// One line of an expense, charged to an expense type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseDetail {
    pub id: ExpenseDetailId,

    pub expense_header_id: ExpenseHeaderId,

    pub expense_type_id: ExpenseTypeId,

    pub amount: Money,

    #[serde(default)]
    pub description: Option<String>,

    /// Position within the header, starting at 0
    #[serde(default)]
    pub line: u32,
}

impl ExpenseDetail {
    pub fn new(
        expense_header_id: ExpenseHeaderId,
        expense_type_id: ExpenseTypeId,
        amount: Money,
    ) -> Self {
        Self {
            id: ExpenseDetailId::new(),
            expense_header_id,
            expense_type_id,
            amount,
            description: None,
            line: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveDetail(self.amount));
        }

        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyCommerce,
    CommerceTooLong(usize),
    NoDetails,
    NonPositiveDetail(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommerce => write!(f, "Commerce name cannot be empty"),
            Self::CommerceTooLong(len) => {
                write!(f, "Commerce name too long ({} chars, max 200)", len)
            }
            Self::NoDetails => write!(f, "An expense needs at least one detail line"),
            Self::NonPositiveDetail(amount) => {
                write!(f, "Detail amount must be greater than zero, got {}", amount)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_new_header() {
        let header = ExpenseHeader::new(date(), FundId::new(), "Market", DocumentType::Receipt);
        assert!(header.total.is_zero());
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_empty_commerce_rejected() {
        let header = ExpenseHeader::new(date(), FundId::new(), "  ", DocumentType::Invoice);
        assert_eq!(header.validate(), Err(ExpenseValidationError::EmptyCommerce));
    }

    #[test]
    fn test_detail_amount_must_be_positive() {
        let header_id = ExpenseHeaderId::new();
        let ok = ExpenseDetail::new(header_id, ExpenseTypeId::new(), Money::from_cents(1));
        assert!(ok.validate().is_ok());

        let zero = ExpenseDetail::new(header_id, ExpenseTypeId::new(), Money::zero());
        assert!(matches!(
            zero.validate(),
            Err(ExpenseValidationError::NonPositiveDetail(_))
        ));
    }

    #[test]
    fn test_document_type_parse() {
        assert_eq!(DocumentType::parse("Factura"), Some(DocumentType::Invoice));
        assert_eq!(DocumentType::parse("receipt"), Some(DocumentType::Receipt));
        assert_eq!(DocumentType::parse("ticket"), None);
    }

    #[test]
    fn test_header_date_serializes_iso() {
        let header = ExpenseHeader::new(date(), FundId::new(), "Market", DocumentType::Receipt);
        let json = serde_json::to_value(&header).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["document_type"], "receipt");
    }
}
