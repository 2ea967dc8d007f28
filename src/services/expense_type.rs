//! Expense type service
//!
//! Creation assigns the next sequential code. A type that budgets or
//! expense details still refer to cannot be deleted.

use tracing::{info, warn};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseType, ExpenseTypeId};
use crate::storage::Storage;

use super::non_empty;

/// Service for expense type management
pub struct ExpenseTypeService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseTypeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a type with the next free code
    pub fn create(&self, name: &str, description: Option<&str>) -> ExpenseResult<ExpenseType> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ExpenseError::Validation(
                "Expense type name cannot be empty".into(),
            ));
        }

        if self.storage.expense_types.name_exists(name, None)? {
            return Err(ExpenseError::Duplicate {
                entity_type: "Expense type",
                identifier: name.to_string(),
            });
        }

        let code = self.storage.expense_types.next_code()?;
        let mut expense_type = ExpenseType::new(code, name);
        expense_type.description = non_empty(description);

        expense_type
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expense_types.upsert(expense_type.clone())?;
        self.storage.expense_types.save()?;

        info!(code = %expense_type.code, name = %expense_type.name, "expense type created");
        Ok(expense_type)
    }

    pub fn get(&self, id: ExpenseTypeId) -> ExpenseResult<Option<ExpenseType>> {
        self.storage.expense_types.get(id)
    }

    /// Find a type by code, name or id
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<ExpenseType>> {
        if let Some(t) = self.storage.expense_types.get_by_code(identifier)? {
            return Ok(Some(t));
        }

        if let Some(t) = self.storage.expense_types.get_by_name(identifier)? {
            return Ok(Some(t));
        }

        self.storage.expense_types.find_by_short_id(identifier)
    }

    /// Like [`find`](Self::find) but a miss is a `NotFound` error
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<ExpenseType> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::expense_type_not_found(identifier))
    }

    /// All types ordered by code
    pub fn list(&self) -> ExpenseResult<Vec<ExpenseType>> {
        self.storage.expense_types.get_all()
    }

    /// Rename a type or change its description. An empty description clears it.
    pub fn update(
        &self,
        id: ExpenseTypeId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> ExpenseResult<ExpenseType> {
        let mut expense_type = self
            .storage
            .expense_types
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_type_not_found(id.to_string()))?;

        if let Some(new_name) = name {
            let new_name = new_name.trim();
            if new_name.is_empty() {
                return Err(ExpenseError::Validation(
                    "Expense type name cannot be empty".into(),
                ));
            }

            if self.storage.expense_types.name_exists(new_name, Some(id))? {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Expense type",
                    identifier: new_name.to_string(),
                });
            }

            expense_type.name = new_name.to_string();
        }

        if let Some(description) = description {
            expense_type.description = non_empty(Some(description));
        }

        expense_type
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expense_types.upsert(expense_type.clone())?;
        self.storage.expense_types.save()?;

        info!(code = %expense_type.code, "expense type updated");
        Ok(expense_type)
    }

    /// Delete a type nothing refers to
    pub fn delete(&self, id: ExpenseTypeId) -> ExpenseResult<ExpenseType> {
        let expense_type = self
            .storage
            .expense_types
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_type_not_found(id.to_string()))?;

        if self.storage.budgets.references_type(id)?
            || self.storage.expense_details.references_type(id)?
        {
            warn!(code = %expense_type.code, "refused to delete expense type in use");
            return Err(ExpenseError::Validation(format!(
                "Expense type '{}' is used by budgets or expenses and cannot be deleted",
                expense_type.name
            )));
        }

        self.storage.expense_types.delete(id)?;
        self.storage.expense_types.save()?;

        info!(code = %expense_type.code, "expense type deleted");
        Ok(expense_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Budget, BudgetMonth, Money, UserId};
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_assigns_next_code() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseTypeService::new(&storage);

        let health = service.create("Health", Some("Doctor visits")).unwrap();
        assert_eq!(health.code, "004");
        assert_eq!(health.description.as_deref(), Some("Doctor visits"));

        let pets = service.create("Pets", None).unwrap();
        assert_eq!(pets.code, "005");
    }

    #[test]
    fn test_create_rejects_empty_and_duplicate() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseTypeService::new(&storage);

        assert!(service.create("  ", None).unwrap_err().is_validation());
        assert!(service.create("food", None).unwrap_err().is_duplicate());
        assert_eq!(service.list().unwrap().len(), 3);
    }

    #[test]
    fn test_find_by_code_name_or_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseTypeService::new(&storage);

        let food = service.find("001").unwrap().unwrap();
        assert_eq!(food.name, "Food");
        assert_eq!(service.find("transport").unwrap().unwrap().code, "002");
        assert_eq!(service.find(&food.id.to_string()).unwrap().unwrap().id, food.id);
        assert!(service.resolve("nothing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseTypeService::new(&storage);
        let food = service.resolve("001").unwrap();

        let updated = service.update(food.id, Some("Groceries"), Some("")).unwrap();
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.code, "001");
        assert!(updated.description.is_none());

        let err = service.update(food.id, Some("Transport"), None).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_delete_refused_when_referenced() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseTypeService::new(&storage);
        let food = service.resolve("001").unwrap();
        let fun = service.resolve("003").unwrap();

        storage
            .budgets
            .upsert(Budget::new(
                UserId::new(),
                food.id,
                BudgetMonth::parse("2024-03").unwrap(),
                Money::from_units(100),
            ))
            .unwrap();

        assert!(service.delete(food.id).unwrap_err().is_validation());
        assert!(service.get(food.id).unwrap().is_some());

        service.delete(fun.id).unwrap();
        assert!(service.get(fun.id).unwrap().is_none());
    }
}
