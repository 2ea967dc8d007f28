//! Storage layer for expense-control
//!
//! One JSON array file per entity collection under `<base>/data/`, written
//! atomically. Collections are loaded into memory once per process.

pub mod budgets;
pub mod collection;
pub mod deposits;
pub mod expense_types;
pub mod expenses;
pub mod file_io;
pub mod funds;
pub mod init;
pub mod users;

pub use collection::{Collection, Record};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;

use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::models::{
    Budget, Deposit, ExpenseDetail, ExpenseHeader, ExpenseType, MonetaryFund, User,
};

/// Logical storage keys, one file each
pub const USERS: &str = "users";
pub const EXPENSE_TYPES: &str = "expense_types";
pub const MONETARY_FUNDS: &str = "monetary_funds";
pub const BUDGETS: &str = "budgets";
pub const EXPENSE_HEADERS: &str = "expense_headers";
pub const EXPENSE_DETAILS: &str = "expense_details";
pub const DEPOSITS: &str = "deposits";
pub const CURRENT_USER: &str = "current_user";

/// Main storage coordinator that provides access to all collections
pub struct Storage {
    paths: ExpensePaths,
    pub users: Collection<User>,
    pub expense_types: Collection<ExpenseType>,
    pub funds: Collection<MonetaryFund>,
    pub budgets: Collection<Budget>,
    pub expense_headers: Collection<ExpenseHeader>,
    pub expense_details: Collection<ExpenseDetail>,
    pub deposits: Collection<Deposit>,
}

impl Storage {
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: Collection::new(paths.collection_file(USERS)),
            expense_types: Collection::new(paths.collection_file(EXPENSE_TYPES)),
            funds: Collection::new(paths.collection_file(MONETARY_FUNDS)),
            budgets: Collection::new(paths.collection_file(BUDGETS)),
            expense_headers: Collection::new(paths.collection_file(EXPENSE_HEADERS)),
            expense_details: Collection::new(paths.collection_file(EXPENSE_DETAILS)),
            deposits: Collection::new(paths.collection_file(DEPOSITS)),
            paths,
        })
    }

    /// Open a data directory: create it if needed and load every collection
    pub fn open(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), ExpenseError> {
        self.users.load()?;
        self.expense_types.load()?;
        self.funds.load()?;
        self.budgets.load()?;
        self.expense_headers.load()?;
        self.expense_details.load()?;
        self.deposits.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.users.save()?;
        self.expense_types.save()?;
        self.funds.save()?;
        self.budgets.save()?;
        self.expense_headers.save()?;
        self.expense_details.save()?;
        self.deposits.save()?;
        Ok(())
    }

    /// Whether `init` has been run for this data directory
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
