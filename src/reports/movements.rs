//! Movements: a unified ledger of expenses and deposits
//!
//! Each expense detail row becomes one outgoing movement, an expense with no
//! detail rows becomes a single movement for its total, and each deposit
//! becomes one incoming movement. Movements are listed newest first.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

use crate::error::ExpenseResult;
use crate::models::{
    Deposit, DepositId, ExpenseDetail, ExpenseDetailId, ExpenseHeader, ExpenseHeaderId,
    ExpenseType, ExpenseTypeId, FundId, MonetaryFund, Money,
};
use crate::storage::Storage;

use super::budget_comparison::UNKNOWN_CATEGORY;

/// Fund name shown when a movement's fund no longer exists
pub const UNKNOWN_FUND: &str = "N/A";

/// Description used for deposits without one
pub const DEFAULT_DEPOSIT_DESCRIPTION: &str = "Deposit";

/// The record a movement was projected from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementId {
    ExpenseDetail(ExpenseDetailId),
    ExpenseHeader(ExpenseHeaderId),
    Deposit(DepositId),
}

impl fmt::Display for MovementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpenseDetail(id) => write!(f, "expense-{}", id),
            Self::ExpenseHeader(id) => write!(f, "expense-{}", id),
            Self::Deposit(id) => write!(f, "deposit-{}", id),
        }
    }
}

/// Expense type attached to an expense movement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: ExpenseTypeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementKind {
    Expense { category: Option<CategoryRef> },
    Deposit,
}

impl MovementKind {
    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense { .. })
    }

    pub fn category(&self) -> Option<&CategoryRef> {
        match self {
            Self::Expense { category } => category.as_ref(),
            Self::Deposit => None,
        }
    }
}

/// Which kind of movement a filter keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    Expense,
    Deposit,
}

impl KindFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "expense" | "expenses" | "gasto" => Some(Self::Expense),
            "deposit" | "deposits" | "deposito" | "depósito" => Some(Self::Deposit),
            _ => None,
        }
    }
}

/// One line of the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    pub id: MovementId,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub description: String,
    /// Negative for expenses, positive for deposits
    pub amount: Money,
    pub fund_id: FundId,
    pub fund_name: String,
}

/// Build the ledger from the full entity set, newest first.
///
/// Ties keep input order: headers (each with its detail rows in line
/// order) come before deposits.
pub fn project_movements(
    headers: &[ExpenseHeader],
    details: &[ExpenseDetail],
    deposits: &[Deposit],
    funds: &[MonetaryFund],
    types: &[ExpenseType],
) -> Vec<Movement> {
    let fund_names: HashMap<FundId, &str> =
        funds.iter().map(|f| (f.id, f.name.as_str())).collect();
    let type_names: HashMap<ExpenseTypeId, &str> =
        types.iter().map(|t| (t.id, t.name.as_str())).collect();

    let mut details_by_header: HashMap<ExpenseHeaderId, Vec<&ExpenseDetail>> = HashMap::new();
    for detail in details {
        details_by_header
            .entry(detail.expense_header_id)
            .or_default()
            .push(detail);
    }
    for rows in details_by_header.values_mut() {
        rows.sort_by_key(|d| d.line);
    }

    let fund_name = |id: FundId| {
        fund_names
            .get(&id)
            .copied()
            .unwrap_or(UNKNOWN_FUND)
            .to_string()
    };

    let mut movements = Vec::new();

    for header in headers {
        match details_by_header.get(&header.id) {
            Some(rows) if !rows.is_empty() => {
                for detail in rows {
                    // a deleted type leaves the movement without a category
                    let category = type_names.get(&detail.expense_type_id).map(|name| {
                        CategoryRef {
                            id: detail.expense_type_id,
                            name: name.to_string(),
                        }
                    });
                    let label = category
                        .as_ref()
                        .map_or(UNKNOWN_CATEGORY, |c| c.name.as_str());

                    movements.push(Movement {
                        id: MovementId::ExpenseDetail(detail.id),
                        date: header.date,
                        description: format!("{} - {}", header.commerce_name, label),
                        kind: MovementKind::Expense { category },
                        amount: -detail.amount,
                        fund_id: header.monetary_fund_id,
                        fund_name: fund_name(header.monetary_fund_id),
                    });
                }
            }
            _ => movements.push(Movement {
                id: MovementId::ExpenseHeader(header.id),
                date: header.date,
                kind: MovementKind::Expense { category: None },
                description: header.commerce_name.clone(),
                amount: -header.total,
                fund_id: header.monetary_fund_id,
                fund_name: fund_name(header.monetary_fund_id),
            }),
        }
    }

    for deposit in deposits {
        movements.push(Movement {
            id: MovementId::Deposit(deposit.id),
            date: deposit.date,
            kind: MovementKind::Deposit,
            description: deposit
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DEPOSIT_DESCRIPTION.to_string()),
            amount: deposit.amount,
            fund_id: deposit.monetary_fund_id,
            fund_name: fund_name(deposit.monetary_fund_id),
        });
    }

    // stable: equal dates keep projection order
    movements.sort_by(|a, b| b.date.cmp(&a.date));
    movements
}

/// Criteria for narrowing the ledger. Every set field must match.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Inclusive
    pub date_from: Option<NaiveDate>,
    /// Inclusive
    pub date_to: Option<NaiveDate>,
    pub kind: Option<KindFilter>,
    pub fund_id: Option<FundId>,
    /// Only expense movements charged to this type match
    pub expense_type_id: Option<ExpenseTypeId>,
    /// Inclusive, compared with the absolute amount
    pub min_amount: Option<Money>,
    /// Inclusive, compared with the absolute amount
    pub max_amount: Option<Money>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &Movement) -> bool {
        if let Some(from) = self.date_from {
            if movement.date < from {
                return false;
            }
        }

        if let Some(to) = self.date_to {
            if movement.date > to {
                return false;
            }
        }

        match self.kind {
            Some(KindFilter::Expense) if !movement.kind.is_expense() => return false,
            Some(KindFilter::Deposit) if movement.kind.is_expense() => return false,
            _ => {}
        }

        if let Some(fund_id) = self.fund_id {
            if movement.fund_id != fund_id {
                return false;
            }
        }

        if let Some(type_id) = self.expense_type_id {
            if movement.kind.category().map(|c| c.id) != Some(type_id) {
                return false;
            }
        }

        let magnitude = movement.amount.abs();
        if let Some(min) = self.min_amount {
            if magnitude < min {
                return false;
            }
        }

        if let Some(max) = self.max_amount {
            if magnitude > max {
                return false;
            }
        }

        true
    }

    /// Keep only matching movements, preserving order
    pub fn apply(&self, movements: Vec<Movement>) -> Vec<Movement> {
        movements.into_iter().filter(|m| self.matches(m)).collect()
    }
}

/// Totals over a set of movements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementTotals {
    pub deposits: Money,
    /// Positive sum of outgoing amounts
    pub expenses: Money,
    pub net: Money,
    pub count: usize,
}

impl From<&[Movement]> for MovementTotals {
    fn from(movements: &[Movement]) -> Self {
        let deposits: Money = movements
            .iter()
            .filter(|m| m.amount.is_positive())
            .map(|m| m.amount)
            .sum();
        let expenses: Money = movements
            .iter()
            .filter(|m| m.amount.is_negative())
            .map(|m| m.amount.abs())
            .sum();

        Self {
            deposits,
            expenses,
            net: deposits - expenses,
            count: movements.len(),
        }
    }
}

/// Filtered ledger with totals
#[derive(Debug, Clone)]
pub struct MovementReport {
    pub movements: Vec<Movement>,
    pub totals: MovementTotals,
}

impl MovementReport {
    pub fn generate(storage: &Storage, filter: &MovementFilter) -> ExpenseResult<Self> {
        let movements = project_movements(
            &storage.expense_headers.get_all()?,
            &storage.expense_details.get_all()?,
            &storage.deposits.get_all()?,
            &storage.funds.get_all()?,
            &storage.expense_types.get_all()?,
        );
        let movements = filter.apply(movements);
        let totals = MovementTotals::from(movements.as_slice());

        Ok(Self { movements, totals })
    }
}
