//! expense-control - Personal expense tracking from the terminal
//!
//! This library provides the core functionality for the `expense` command:
//! monetary funds with running balances, deposits and itemized expenses that
//! move those balances, and monthly budgets per expense type compared with
//! actual spending.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (funds, expenses, deposits, budgets, users)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, including fund balance maintenance
//! - `auth`: Password hashing, bearer tokens and the persisted session
//! - `reports`: Budget comparison, movement ledger and dashboard
//! - `export`: CSV export of movements
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_control::config::{paths::ExpensePaths, settings::Settings};
//! use expense_control::storage::Storage;
//!
//! let paths = ExpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
