//! Export module for expense-control
//!
//! Writes the movement ledger in spreadsheet-compatible CSV.

pub mod csv;

pub use self::csv::{default_export_filename, export_movements_csv, MOVEMENT_HEADERS};
