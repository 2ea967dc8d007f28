//! Expense service
//!
//! An expense is written as a header plus its detail rows. Editing replaces
//! every detail row; deleting removes them. The fund is debited by the
//! header total and credited back when the expense is edited or removed.

use chrono::NaiveDate;
use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::ExpenseValidationError;
use crate::models::{
    DocumentType, ExpenseDetail, ExpenseHeader, ExpenseHeaderId, ExpenseTypeId, FundId, Money,
};
use crate::storage::Storage;

use super::balance::{BalanceService, FundEffect};
use super::non_empty;

/// One line of an expense being created or edited
#[derive(Debug, Clone)]
pub struct DetailInput {
    pub expense_type_id: ExpenseTypeId,
    pub amount: Money,
    pub description: Option<String>,
}

/// Data for a new or edited expense
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub fund_id: FundId,
    pub commerce_name: String,
    pub document_type: DocumentType,
    pub document_number: Option<String>,
    pub observations: String,
    pub details: Vec<DetailInput>,
}

/// A header together with its detail rows
#[derive(Debug, Clone)]
pub struct ExpenseWithDetails {
    pub header: ExpenseHeader,
    pub details: Vec<ExpenseDetail>,
}

fn effect_of(header: &ExpenseHeader) -> FundEffect {
    FundEffect::debit(header.monetary_fund_id, header.total)
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    balances: BalanceService<'a>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            balances: BalanceService::new(storage),
        }
    }

    pub fn create(&self, input: ExpenseInput) -> ExpenseResult<ExpenseWithDetails> {
        let mut header = ExpenseHeader::new(
            input.date,
            input.fund_id,
            input.commerce_name.trim(),
            input.document_type,
        );
        let details = self.prepare(&mut header, &input)?;
        let funds = self.balances.plan(&[effect_of(&header)])?;

        self.write(&header, &details)?;
        self.balances.commit(funds)?;

        info!(
            expense = %header.id,
            total = %header.total,
            lines = details.len(),
            "expense created"
        );
        Ok(ExpenseWithDetails { header, details })
    }

    pub fn get(&self, id: ExpenseHeaderId) -> ExpenseResult<Option<ExpenseHeader>> {
        self.storage.expense_headers.get(id)
    }

    pub fn get_with_details(&self, id: ExpenseHeaderId) -> ExpenseResult<ExpenseWithDetails> {
        let header = self
            .storage
            .expense_headers
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        let details = self.storage.expense_details.by_header(id)?;

        Ok(ExpenseWithDetails { header, details })
    }

    pub fn resolve(&self, identifier: &str) -> ExpenseResult<ExpenseHeader> {
        self.storage
            .expense_headers
            .find_by_short_id(identifier)?
            .ok_or_else(|| ExpenseError::expense_not_found(identifier))
    }

    /// All expense headers, newest first
    pub fn list(&self) -> ExpenseResult<Vec<ExpenseHeader>> {
        self.storage.expense_headers.get_all()
    }

    /// Replace an expense, including all of its detail rows
    pub fn update(
        &self,
        id: ExpenseHeaderId,
        input: ExpenseInput,
    ) -> ExpenseResult<ExpenseWithDetails> {
        let existing = self
            .storage
            .expense_headers
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let mut header = existing.clone();
        header.date = input.date;
        header.monetary_fund_id = input.fund_id;
        header.commerce_name = input.commerce_name.trim().to_string();
        header.document_type = input.document_type;

        let details = self.prepare(&mut header, &input)?;
        let funds = self
            .balances
            .plan(&[effect_of(&existing).reversed(), effect_of(&header)])?;

        self.storage.expense_details.delete_by_header(id)?;
        self.write(&header, &details)?;
        self.balances.commit(funds)?;

        info!(expense = %header.id, total = %header.total, "expense updated");
        Ok(ExpenseWithDetails { header, details })
    }

    /// Delete an expense and its detail rows, crediting the fund back
    pub fn delete(&self, id: ExpenseHeaderId) -> ExpenseResult<ExpenseHeader> {
        let header = self
            .storage
            .expense_headers
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        let funds = self.balances.plan(&[effect_of(&header).reversed()])?;

        let removed = self.storage.expense_details.delete_by_header(id)?;
        self.storage.expense_headers.delete(id)?;
        self.storage.expense_details.save()?;
        self.storage.expense_headers.save()?;
        self.balances.commit(funds)?;

        info!(expense = %header.id, lines = removed, "expense deleted");
        Ok(header)
    }

    /// Validate the input, fill in the header's optional fields and total,
    /// and build the detail rows. Nothing is written.
    fn prepare(
        &self,
        header: &mut ExpenseHeader,
        input: &ExpenseInput,
    ) -> ExpenseResult<Vec<ExpenseDetail>> {
        header.document_number = non_empty(input.document_number.as_deref());
        header.observations = input.observations.trim().to_string();

        header
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        if input.details.is_empty() {
            return Err(ExpenseError::Validation(
                ExpenseValidationError::NoDetails.to_string(),
            ));
        }

        let mut details = Vec::with_capacity(input.details.len());
        for (line, line_input) in input.details.iter().enumerate() {
            if !self.storage.expense_types.exists(line_input.expense_type_id)? {
                return Err(ExpenseError::expense_type_not_found(
                    line_input.expense_type_id.to_string(),
                ));
            }

            let mut detail =
                ExpenseDetail::new(header.id, line_input.expense_type_id, line_input.amount);
            detail.description = non_empty(line_input.description.as_deref());
            detail.line = line as u32;
            detail
                .validate()
                .map_err(|e| ExpenseError::Validation(e.to_string()))?;

            details.push(detail);
        }

        header.total = Money::checked_sum(details.iter().map(|d| d.amount))
            .ok_or_else(|| ExpenseError::Validation("Expense total is out of range".into()))?;
        Ok(details)
    }

    fn write(&self, header: &ExpenseHeader, details: &[ExpenseDetail]) -> ExpenseResult<()> {
        self.storage.expense_headers.upsert(header.clone())?;
        for detail in details {
            self.storage.expense_details.upsert(detail.clone())?;
        }

        self.storage.expense_headers.save()?;
        self.storage.expense_details.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{ExpenseType, FundType, MonetaryFund};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        storage: Storage,
        checking: FundId,
        cash: FundId,
        food: ExpenseTypeId,
        transport: ExpenseTypeId,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        let checking = MonetaryFund::new("Checking", FundType::Bank, Money::from_units(1000));
        let cash = MonetaryFund::new("Cash", FundType::Cash, Money::from_units(500));
        let food = ExpenseType::new("001", "Food");
        let transport = ExpenseType::new("002", "Transport");

        let fixture = Fixture {
            checking: checking.id,
            cash: cash.id,
            food: food.id,
            transport: transport.id,
            storage,
            _temp_dir: temp_dir,
        };

        fixture.storage.funds.upsert(checking).unwrap();
        fixture.storage.funds.upsert(cash).unwrap();
        fixture.storage.expense_types.upsert(food).unwrap();
        fixture.storage.expense_types.upsert(transport).unwrap();
        fixture
    }

    fn line(expense_type_id: ExpenseTypeId, cents: i64) -> DetailInput {
        DetailInput {
            expense_type_id,
            amount: Money::from_cents(cents),
            description: None,
        }
    }

    fn input(fund_id: FundId, details: Vec<DetailInput>) -> ExpenseInput {
        ExpenseInput {
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            fund_id,
            commerce_name: "Market".into(),
            document_type: DocumentType::Receipt,
            document_number: None,
            observations: String::new(),
            details,
        }
    }

    fn balance(f: &Fixture, id: FundId) -> Money {
        f.storage.funds.get(id).unwrap().unwrap().balance
    }

    #[test]
    fn test_create_sums_details_and_debits_fund() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);

        let created = service
            .create(input(
                f.checking,
                vec![line(f.food, 3000), line(f.transport, 1550)],
            ))
            .unwrap();

        assert_eq!(created.header.total, Money::from_cents(4550));
        assert_eq!(created.details.len(), 2);
        assert_eq!(created.details[1].line, 1);
        assert_eq!(balance(&f, f.checking), Money::from_cents(95450));

        let loaded = service.get_with_details(created.header.id).unwrap();
        assert_eq!(loaded.details.len(), 2);
        assert_eq!(loaded.details[0].amount, Money::from_cents(3000));
    }

    #[test]
    fn test_create_validation_writes_nothing() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);

        let no_lines = service.create(input(f.checking, vec![]));
        assert!(no_lines.unwrap_err().is_validation());

        let zero_line = service.create(input(f.checking, vec![line(f.food, 0)]));
        assert!(zero_line.unwrap_err().is_validation());

        let mut blank = input(f.checking, vec![line(f.food, 100)]);
        blank.commerce_name = "  ".into();
        assert!(service.create(blank).unwrap_err().is_validation());

        let unknown_type = service.create(input(f.checking, vec![line(ExpenseTypeId::new(), 100)]));
        assert!(unknown_type.unwrap_err().is_not_found());

        let unknown_fund = service.create(input(FundId::new(), vec![line(f.food, 100)]));
        assert!(unknown_fund.unwrap_err().is_not_found());

        assert_eq!(f.storage.expense_headers.count().unwrap(), 0);
        assert_eq!(f.storage.expense_details.count().unwrap(), 0);
        assert_eq!(balance(&f, f.checking), Money::from_units(1000));
    }

    #[test]
    fn test_out_of_range_amounts_write_nothing() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);
        let max = i64::MAX;

        let total_overflows =
            service.create(input(f.checking, vec![line(f.food, max), line(f.food, max)]));
        assert!(total_overflows.unwrap_err().is_validation());
        assert_eq!(f.storage.expense_headers.count().unwrap(), 0);

        service.create(input(f.cash, vec![line(f.food, max)])).unwrap();
        let debited = balance(&f, f.cash);

        let fund_underflows = service.create(input(f.cash, vec![line(f.food, max)]));
        assert!(fund_underflows.unwrap_err().is_validation());

        assert_eq!(f.storage.expense_headers.count().unwrap(), 1);
        assert_eq!(f.storage.expense_details.count().unwrap(), 1);
        assert_eq!(balance(&f, f.cash), debited);
    }

    #[test]
    fn test_update_replaces_details_and_rebalances() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);

        let created = service
            .create(input(
                f.checking,
                vec![line(f.food, 3000), line(f.transport, 1000)],
            ))
            .unwrap();
        let old_ids: Vec<_> = created.details.iter().map(|d| d.id).collect();

        let updated = service
            .update(created.header.id, input(f.checking, vec![line(f.food, 2500)]))
            .unwrap();

        assert_eq!(updated.header.id, created.header.id);
        assert_eq!(updated.header.total, Money::from_cents(2500));
        assert_eq!(f.storage.expense_details.count().unwrap(), 1);
        for id in old_ids {
            assert!(!f.storage.expense_details.exists(id).unwrap());
        }
        assert_eq!(balance(&f, f.checking), Money::from_units(975));
    }

    #[test]
    fn test_update_moves_debit_between_funds() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);

        let created = service
            .create(input(f.checking, vec![line(f.food, 10000)]))
            .unwrap();
        service
            .update(created.header.id, input(f.cash, vec![line(f.food, 8000)]))
            .unwrap();

        assert_eq!(balance(&f, f.checking), Money::from_units(1000));
        assert_eq!(balance(&f, f.cash), Money::from_units(420));
    }

    #[test]
    fn test_delete_cascades_and_credits_fund() {
        let f = fixture();
        let service = ExpenseService::new(&f.storage);

        let keep = service
            .create(input(f.checking, vec![line(f.food, 500)]))
            .unwrap();
        let created = service
            .create(input(
                f.checking,
                vec![line(f.food, 3000), line(f.transport, 1550)],
            ))
            .unwrap();

        service.delete(created.header.id).unwrap();

        assert_eq!(f.storage.expense_headers.count().unwrap(), 1);
        assert_eq!(f.storage.expense_details.count().unwrap(), 1);
        assert!(f
            .storage
            .expense_details
            .by_header(keep.header.id)
            .unwrap()
            .len()
            == 1);
        assert_eq!(balance(&f, f.checking), Money::from_units(995));
        assert!(service
            .get_with_details(created.header.id)
            .unwrap_err()
            .is_not_found());
    }
}
