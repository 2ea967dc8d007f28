//! Core data models for expense-control
//!
//! The entities of the expense domain: users, expense types, monetary funds,
//! budgets, expenses with their detail rows, and deposits.

pub mod budget;
pub mod deposit;
pub mod expense;
pub mod expense_type;
pub mod fund;
pub mod ids;
pub mod money;
pub mod month;
pub mod user;

pub use budget::Budget;
pub use deposit::Deposit;
pub use expense::{DocumentType, ExpenseDetail, ExpenseHeader};
pub use expense_type::ExpenseType;
pub use fund::{FundType, MonetaryFund};
pub use ids::{
    BudgetId, DepositId, EntityId, ExpenseDetailId, ExpenseHeaderId, ExpenseTypeId, FundId,
    UserId,
};
pub use money::Money;
pub use month::BudgetMonth;
pub use user::User;
