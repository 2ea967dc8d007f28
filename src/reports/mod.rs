//! Reports module for expense-control
//!
//! Read-side views recomputed from the full entity set on every call:
//! budget versus actual spending, the movement ledger, and the monthly
//! dashboard.

pub mod budget_comparison;
pub mod dashboard;
pub mod movements;

pub use budget_comparison::{
    compute_comparison, compute_distribution, spent_by_category, BudgetComparisonReport,
    BudgetComparisonRow, BudgetStatus, CategorySpending,
};
pub use dashboard::DashboardSummary;
pub use movements::{
    project_movements, CategoryRef, KindFilter, Movement, MovementFilter, MovementId,
    MovementKind, MovementReport, MovementTotals,
};
