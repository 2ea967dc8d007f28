//! Expense type collection (expense_types.json)

use std::cmp::Ordering;

use crate::error::ExpenseError;
use crate::models::expense_type::next_code;
use crate::models::{ExpenseType, ExpenseTypeId};

use super::collection::{Collection, Record};

impl Record for ExpenseType {
    type Id = ExpenseTypeId;
    const ENTITY: &'static str = "Expense type";

    fn id(&self) -> ExpenseTypeId {
        self.id
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code).then_with(|| self.name.cmp(&other.name))
    }
}

impl Collection<ExpenseType> {
    pub fn get_by_code(&self, code: &str) -> Result<Option<ExpenseType>, ExpenseError> {
        let code = code.trim();
        Ok(self.filter(|t| t.code == code)?.into_iter().next())
    }

    /// Find a type by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<ExpenseType>, ExpenseError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .filter(|t| t.name.to_lowercase() == wanted)?
            .into_iter()
            .next())
    }

    pub fn name_exists(
        &self,
        name: &str,
        exclude_id: Option<ExpenseTypeId>,
    ) -> Result<bool, ExpenseError> {
        let wanted = name.trim().to_lowercase();
        self.any(|t| t.name.to_lowercase() == wanted && Some(t.id) != exclude_id)
    }

    /// Code for the next type created: highest numeric code plus one
    pub fn next_code(&self) -> Result<String, ExpenseError> {
        Ok(next_code(&self.get_all()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_collection() -> (TempDir, Collection<ExpenseType>) {
        let temp_dir = TempDir::new().unwrap();
        let types = Collection::new(temp_dir.path().join("expense_types.json"));
        (temp_dir, types)
    }

    #[test]
    fn test_lookup_by_code_and_name() {
        let (_temp_dir, types) = create_test_collection();
        types.upsert(ExpenseType::new("001", "Food")).unwrap();
        types.upsert(ExpenseType::new("002", "Transport")).unwrap();

        assert_eq!(types.get_by_code("002").unwrap().unwrap().name, "Transport");
        assert_eq!(types.get_by_name("food").unwrap().unwrap().code, "001");
        assert!(types.get_by_code("009").unwrap().is_none());
    }

    #[test]
    fn test_next_code_follows_highest() {
        let (_temp_dir, types) = create_test_collection();
        assert_eq!(types.next_code().unwrap(), "001");

        types.upsert(ExpenseType::new("001", "Food")).unwrap();
        types.upsert(ExpenseType::new("004", "Health")).unwrap();
        assert_eq!(types.next_code().unwrap(), "005");
    }

    #[test]
    fn test_listing_ordered_by_code() {
        let (_temp_dir, types) = create_test_collection();
        types.upsert(ExpenseType::new("003", "Fun")).unwrap();
        types.upsert(ExpenseType::new("001", "Food")).unwrap();

        let codes: Vec<_> = types.get_all().unwrap().into_iter().map(|t| t.code).collect();
        assert_eq!(codes, vec!["001", "003"]);
    }
}
