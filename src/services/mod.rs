//! Service layer for expense-control
//!
//! Services validate input, write through the storage layer, and keep fund
//! balances consistent with deposits and expenses.

pub mod balance;
pub mod budget;
pub mod deposit;
pub mod expense;
pub mod expense_type;
pub mod fund;

pub use balance::{BalanceService, FundEffect};
pub use budget::{BudgetService, BudgetUpdate};
pub use deposit::{DepositInput, DepositService};
pub use expense::{DetailInput, ExpenseInput, ExpenseService, ExpenseWithDetails};
pub use expense_type::ExpenseTypeService;
pub use fund::{FundService, FundUpdate};

/// Trimmed text, or `None` when nothing is left
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
