//! Storage initialization
//!
//! Seeds the default expense types and monetary funds on first run.
//! A collection file that already exists is never touched.

use tracing::info;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::expense_type::format_code;
use crate::models::{ExpenseType, FundType, MonetaryFund, Money};

use super::file_io::write_json_atomic;
use super::{EXPENSE_TYPES, MONETARY_FUNDS};

/// What a call to [`initialize_storage`] created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub expense_types_seeded: usize,
    pub funds_seeded: usize,
}

impl InitSummary {
    pub fn seeded_anything(&self) -> bool {
        self.expense_types_seeded > 0 || self.funds_seeded > 0
    }
}

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &ExpensePaths) -> Result<InitSummary, ExpenseError> {
    paths.ensure_directories()?;

    let mut summary = InitSummary::default();

    let types_file = paths.collection_file(EXPENSE_TYPES);
    if !types_file.exists() {
        let types = default_expense_types();
        summary.expense_types_seeded = types.len();
        write_json_atomic(&types_file, &types)?;
    }

    let funds_file = paths.collection_file(MONETARY_FUNDS);
    if !funds_file.exists() {
        let funds = default_funds();
        summary.funds_seeded = funds.len();
        write_json_atomic(&funds_file, &funds)?;
    }

    if summary.seeded_anything() {
        info!(
            expense_types = summary.expense_types_seeded,
            funds = summary.funds_seeded,
            "seeded default data"
        );
    }

    Ok(summary)
}

/// Whether a data directory still lacks its seed data
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.collection_file(EXPENSE_TYPES).exists()
        || !paths.collection_file(MONETARY_FUNDS).exists()
}

fn default_expense_types() -> Vec<ExpenseType> {
    [
        ("Food", "Groceries and meals"),
        ("Transport", "Fuel, fares and parking"),
        ("Entertainment", "Leisure and outings"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, description))| {
        ExpenseType::new(format_code(i as u32 + 1), name).with_description(description)
    })
    .collect()
}

fn default_funds() -> Vec<MonetaryFund> {
    vec![
        MonetaryFund::new("Checking Account", FundType::Bank, Money::from_units(5000)),
        MonetaryFund::new("Petty Cash", FundType::Cash, Money::from_units(500)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));
        let summary = initialize_storage(&paths).unwrap();

        assert_eq!(summary.expense_types_seeded, 3);
        assert_eq!(summary.funds_seeded, 2);
        assert!(!needs_initialization(&paths));
    }

    #[test]
    fn test_default_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let types: Vec<ExpenseType> = read_json(paths.collection_file(EXPENSE_TYPES)).unwrap();
        let codes: Vec<_> = types.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["001", "002", "003"]);
        assert_eq!(types[0].name, "Food");

        let funds: Vec<MonetaryFund> = read_json(paths.collection_file(MONETARY_FUNDS)).unwrap();
        assert_eq!(funds[0].name, "Checking Account");
        assert_eq!(funds[0].balance, Money::from_units(5000));
        assert_eq!(funds[1].fund_type, FundType::Cash);
        assert_eq!(funds[1].balance, Money::from_units(500));
    }

    #[test]
    fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();

        let custom = vec![ExpenseType::new("001", "Custom")];
        write_json_atomic(paths.collection_file(EXPENSE_TYPES), &custom).unwrap();

        let summary = initialize_storage(&paths).unwrap();
        assert!(!summary.seeded_anything());

        let types: Vec<ExpenseType> = read_json(paths.collection_file(EXPENSE_TYPES)).unwrap();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "Custom");
    }
}
