//! Budget vs. actual report
//!
//! Spending is always recomputed from expense detail rows: details are
//! joined to their headers, headers are filtered to the month, and the
//! amounts are summed per expense type.

use std::collections::HashMap;

use crate::auth::Session;
use crate::error::ExpenseResult;
use crate::models::{
    Budget, BudgetMonth, ExpenseDetail, ExpenseHeader, ExpenseHeaderId, ExpenseType,
    ExpenseTypeId, Money,
};
use crate::storage::Storage;

/// Percentage at which a budget is flagged as a warning
pub const WARNING_THRESHOLD: i64 = 80;

/// Percentage at which a budget counts as exceeded
pub const EXCEEDED_THRESHOLD: i64 = 100;

/// Name used for expense types that no longer exist
pub const UNKNOWN_CATEGORY: &str = "Uncategorized";

/// How much of a budget has been used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Normal,
    Warning,
    Exceeded,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: i64) -> Self {
        if percentage >= EXCEEDED_THRESHOLD {
            Self::Exceeded
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => f.pad("Normal"),
            Self::Warning => f.pad("Warning"),
            Self::Exceeded => f.pad("Exceeded"),
        }
    }
}

/// One budget compared to actual spending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetComparisonRow {
    pub expense_type_id: ExpenseTypeId,
    pub category: String,
    pub budgeted: Money,
    pub spent: Money,
    /// Budgeted minus spent; negative when over budget
    pub difference: Money,
    /// Spent as a whole percentage of budgeted (0 when nothing is budgeted)
    pub percentage: i64,
    pub status: BudgetStatus,
}

/// Spending on one expense type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpending {
    pub expense_type_id: ExpenseTypeId,
    pub category: String,
    pub amount: Money,
    /// Share of the month's total spending, as a whole percentage
    pub share: i64,
}

fn category_name(types: &[ExpenseType], id: ExpenseTypeId) -> String {
    types
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
}

/// Total detail amount per expense type for expenses dated in `month`
pub fn spent_by_category(
    month: BudgetMonth,
    headers: &[ExpenseHeader],
    details: &[ExpenseDetail],
) -> HashMap<ExpenseTypeId, Money> {
    let in_month: std::collections::HashSet<ExpenseHeaderId> = headers
        .iter()
        .filter(|h| month.contains(h.date))
        .map(|h| h.id)
        .collect();

    let mut spent: HashMap<ExpenseTypeId, Money> = HashMap::new();
    for detail in details
        .iter()
        .filter(|d| in_month.contains(&d.expense_header_id))
    {
        *spent.entry(detail.expense_type_id).or_default() += detail.amount;
    }

    spent
}

/// Compare each budget of `month` with what was spent, in budget order
pub fn compute_comparison(
    month: BudgetMonth,
    budgets: &[Budget],
    headers: &[ExpenseHeader],
    details: &[ExpenseDetail],
    types: &[ExpenseType],
) -> Vec<BudgetComparisonRow> {
    let spent = spent_by_category(month, headers, details);

    budgets
        .iter()
        .filter(|b| b.month == month)
        .map(|budget| {
            let spent_amount = spent
                .get(&budget.expense_type_id)
                .copied()
                .unwrap_or_default();
            let percentage = spent_amount.percentage_of(budget.budget_amount);

            BudgetComparisonRow {
                expense_type_id: budget.expense_type_id,
                category: category_name(types, budget.expense_type_id),
                budgeted: budget.budget_amount,
                spent: spent_amount,
                difference: budget.budget_amount - spent_amount,
                percentage,
                status: BudgetStatus::from_percentage(percentage),
            }
        })
        .collect()
}

/// Categories with spending in `month`, largest first
pub fn compute_distribution(
    month: BudgetMonth,
    headers: &[ExpenseHeader],
    details: &[ExpenseDetail],
    types: &[ExpenseType],
) -> Vec<CategorySpending> {
    let spent = spent_by_category(month, headers, details);
    let total: Money = spent.values().sum();

    let mut distribution: Vec<CategorySpending> = spent
        .into_iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|(expense_type_id, amount)| CategorySpending {
            expense_type_id,
            category: category_name(types, expense_type_id),
            amount,
            share: amount.percentage_of(total),
        })
        .collect();

    distribution.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    distribution
}

/// Budget comparison for one user and month, with totals
#[derive(Debug, Clone)]
pub struct BudgetComparisonReport {
    pub month: BudgetMonth,
    pub rows: Vec<BudgetComparisonRow>,
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_difference: Money,
    pub overall_percentage: i64,
    pub overall_status: BudgetStatus,
    pub distribution: Vec<CategorySpending>,
}

impl BudgetComparisonReport {
    /// Build the report for the session's budgets in `month`
    pub fn generate(storage: &Storage, session: &Session, month: BudgetMonth) -> ExpenseResult<Self> {
        let budgets = storage.budgets.for_user(session.user_id, Some(month))?;
        let headers = storage.expense_headers.in_month(month)?;
        let details = storage.expense_details.get_all()?;
        let types = storage.expense_types.get_all()?;

        let rows = compute_comparison(month, &budgets, &headers, &details, &types);
        let distribution = compute_distribution(month, &headers, &details, &types);

        Ok(Self::from_rows(month, rows, distribution))
    }

    pub fn from_rows(
        month: BudgetMonth,
        rows: Vec<BudgetComparisonRow>,
        distribution: Vec<CategorySpending>,
    ) -> Self {
        let total_budgeted: Money = rows.iter().map(|r| r.budgeted).sum();
        let total_spent: Money = rows.iter().map(|r| r.spent).sum();
        let overall_percentage = total_spent.percentage_of(total_budgeted);

        Self {
            month,
            rows,
            total_budgeted,
            total_spent,
            total_difference: total_budgeted - total_spent,
            overall_percentage,
            overall_status: BudgetStatus::from_percentage(overall_percentage),
            distribution,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget vs. Actual: {}\n", self.month));
        output.push_str(&"=".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets for this month.\n");
        } else {
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>5} {:>9}\n",
                "Category", "Budgeted", "Spent", "Difference", "%", "Status"
            ));
            output.push_str(&"-".repeat(78));
            output.push('\n');

            for row in &self.rows {
                output.push_str(&format!(
                    "{:<24} {:>12} {:>12} {:>12} {:>4}% {:>9}\n",
                    truncate(&row.category, 24),
                    row.budgeted,
                    row.spent,
                    row.difference,
                    row.percentage,
                    row.status
                ));
            }

            output.push_str(&"-".repeat(78));
            output.push('\n');
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>12} {:>4}% {:>9}\n",
                "TOTAL",
                self.total_budgeted,
                self.total_spent,
                self.total_difference,
                self.overall_percentage,
                self.overall_status
            ));
        }

        if !self.distribution.is_empty() {
            output.push_str("\nSpending by category\n");
            for slice in &self.distribution {
                output.push_str(&format!(
                    "  {:<22} {:>12} {:>4}%\n",
                    truncate(&slice.category, 22),
                    slice.amount,
                    slice.share
                ));
            }
        }

        output
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentType, FundId, UserId};
    use chrono::NaiveDate;

    fn march() -> BudgetMonth {
        BudgetMonth::parse("2024-03").unwrap()
    }

    fn header(y: i32, m: u32, d: u32) -> ExpenseHeader {
        ExpenseHeader::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            FundId::new(),
            "Shop",
            DocumentType::Receipt,
        )
    }

    fn detail(header: &ExpenseHeader, expense_type: &ExpenseType, units: i64) -> ExpenseDetail {
        ExpenseDetail::new(header.id, expense_type.id, Money::from_units(units))
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(BudgetStatus::from_percentage(0), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::from_percentage(79), BudgetStatus::Normal);
        assert_eq!(BudgetStatus::from_percentage(80), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percentage(99), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percentage(100), BudgetStatus::Exceeded);
        assert_eq!(BudgetStatus::from_percentage(250), BudgetStatus::Exceeded);
    }

    #[test]
    fn test_budget_with_partial_spending() {
        let food = ExpenseType::new("001", "Food");
        let h1 = header(2024, 3, 5);
        let h2 = header(2024, 3, 20);
        let details = vec![detail(&h1, &food, 100), detail(&h2, &food, 50)];
        let budgets = vec![Budget::new(UserId::new(), food.id, march(), Money::from_units(200))];

        let rows = compute_comparison(
            march(),
            &budgets,
            &[h1, h2],
            &details,
            std::slice::from_ref(&food),
        );

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.category, "Food");
        assert_eq!(row.spent, Money::from_units(150));
        assert_eq!(row.difference, Money::from_units(50));
        assert_eq!(row.percentage, 75);
        assert_eq!(row.status, BudgetStatus::Normal);
    }

    #[test]
    fn test_overspent_budget() {
        let food = ExpenseType::new("001", "Food");
        let h = header(2024, 3, 5);
        let details = vec![detail(&h, &food, 220)];
        let budgets = vec![Budget::new(UserId::new(), food.id, march(), Money::from_units(200))];

        let rows = compute_comparison(march(), &budgets, &[h], &details, &[food]);

        assert_eq!(rows[0].percentage, 110);
        assert_eq!(rows[0].difference, Money::from_units(-20));
        assert_eq!(rows[0].status, BudgetStatus::Exceeded);
    }

    #[test]
    fn test_zero_budget_has_zero_percentage() {
        let food = ExpenseType::new("001", "Food");
        let h = header(2024, 3, 5);
        let details = vec![detail(&h, &food, 50)];
        let budgets = vec![Budget::new(UserId::new(), food.id, march(), Money::zero())];

        let rows = compute_comparison(march(), &budgets, &[h], &details, &[food]);

        assert_eq!(rows[0].percentage, 0);
        assert_eq!(rows[0].status, BudgetStatus::Normal);
    }

    #[test]
    fn test_other_months_ignored() {
        let food = ExpenseType::new("001", "Food");
        let feb = header(2024, 2, 29);
        let apr = header(2024, 4, 1);
        let details = vec![detail(&feb, &food, 70), detail(&apr, &food, 30)];
        let budgets = vec![
            Budget::new(UserId::new(), food.id, march(), Money::from_units(100)),
            Budget::new(UserId::new(), food.id, march().next(), Money::from_units(100)),
        ];

        let rows = compute_comparison(march(), &budgets, &[feb, apr], &details, &[food]);

        assert_eq!(rows.len(), 1);
        assert!(rows[0].spent.is_zero());
    }

    #[test]
    fn test_spent_sums_match_details_in_month() {
        let food = ExpenseType::new("001", "Food");
        let transport = ExpenseType::new("002", "Transport");
        let h1 = header(2024, 3, 1);
        let h2 = header(2024, 3, 31);
        let other = header(2024, 5, 1);
        let details = vec![
            detail(&h1, &food, 10),
            detail(&h1, &transport, 5),
            detail(&h2, &food, 7),
            detail(&other, &food, 1000),
        ];

        let spent = spent_by_category(march(), &[h1, h2, other], &details);

        let total: Money = spent.values().sum();
        assert_eq!(total, Money::from_units(22));
        assert_eq!(spent[&food.id], Money::from_units(17));
        assert_eq!(spent[&transport.id], Money::from_units(5));
    }

    #[test]
    fn test_distribution_sorted_descending() {
        let food = ExpenseType::new("001", "Food");
        let transport = ExpenseType::new("002", "Transport");
        let fun = ExpenseType::new("003", "Fun");
        let h = header(2024, 3, 10);
        let details = vec![
            detail(&h, &food, 30),
            detail(&h, &transport, 60),
            detail(&h, &fun, 10),
        ];

        let distribution = compute_distribution(
            march(),
            std::slice::from_ref(&h),
            &details,
            &[food, transport, fun],
        );

        let names: Vec<_> = distribution.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Transport", "Food", "Fun"]);
        assert_eq!(distribution[0].share, 60);
    }

    #[test]
    fn test_unknown_type_named_uncategorized() {
        let h = header(2024, 3, 10);
        let orphan = ExpenseDetail::new(h.id, ExpenseTypeId::new(), Money::from_units(5));

        let distribution = compute_distribution(march(), &[h], &[orphan], &[]);
        assert_eq!(distribution[0].category, UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_report_totals() {
        let food = ExpenseType::new("001", "Food");
        let transport = ExpenseType::new("002", "Transport");
        let h = header(2024, 3, 10);
        let details = vec![detail(&h, &food, 150), detail(&h, &transport, 90)];
        let user = UserId::new();
        let budgets = vec![
            Budget::new(user, food.id, march(), Money::from_units(200)),
            Budget::new(user, transport.id, march(), Money::from_units(100)),
        ];
        let types = [food, transport];

        let rows = compute_comparison(march(), &budgets, std::slice::from_ref(&h), &details, &types);
        let report = BudgetComparisonReport::from_rows(march(), rows, Vec::new());

        assert_eq!(report.total_budgeted, Money::from_units(300));
        assert_eq!(report.total_spent, Money::from_units(240));
        assert_eq!(report.overall_percentage, 80);
        assert_eq!(report.overall_status, BudgetStatus::Warning);

        let text = report.format_terminal();
        assert!(text.contains("Budget vs. Actual: 2024-03"));
        assert!(text.contains("Transport"));
        assert!(text.contains("TOTAL"));
    }
}
