//! Expense type model
//!
//! The spending categories that budgets and expense detail rows refer to.
//! Each type carries a sequential three-digit code ("001", "002", ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseTypeId;

/// Width of the zero-padded type code
pub const CODE_WIDTH: usize = 3;

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseType {
    pub id: ExpenseTypeId,

    /// Zero-padded sequential code, unique
    pub code: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl ExpenseType {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ExpenseTypeId::new(),
            code: code.into(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Numeric value of the code, if it is numeric
    pub fn code_number(&self) -> Option<u32> {
        self.code.trim().parse().ok()
    }

    pub fn validate(&self) -> Result<(), ExpenseTypeValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseTypeValidationError::EmptyName);
        }

        if self.name.len() > 100 {
            return Err(ExpenseTypeValidationError::NameTooLong(self.name.len()));
        }

        if self.code.trim().is_empty() {
            return Err(ExpenseTypeValidationError::EmptyCode);
        }

        Ok(())
    }
}

/// Format a code number the way stored codes look ("7" → "007")
pub fn format_code(number: u32) -> String {
    format!("{:0width$}", number, width = CODE_WIDTH)
}

/// The code that follows the highest numeric code among `types`.
///
/// Non-numeric codes are ignored; an empty set starts at "001".
pub fn next_code<'a>(types: impl IntoIterator<Item = &'a ExpenseType>) -> String {
    let max = types
        .into_iter()
        .filter_map(ExpenseType::code_number)
        .max()
        .unwrap_or(0);
    format_code(max + 1)
}

impl fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}

/// Validation errors for expense types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseTypeValidationError {
    EmptyName,
    NameTooLong(usize),
    EmptyCode,
}

impl fmt::Display for ExpenseTypeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense type name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Expense type name too long ({} chars, max 100)", len)
            }
            Self::EmptyCode => write!(f, "Expense type code cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseTypeValidationError {}
