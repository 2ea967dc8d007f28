//! Display formatting for terminal output
//!
//! List views render as tables via `tabled`; single records render as
//! aligned key/value blocks.

pub mod budget;
pub mod catalog;
pub mod expense;
pub mod movement;

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

pub use budget::format_budget_list;
pub use catalog::{format_expense_type_list, format_fund_details, format_fund_list};
pub use expense::{format_deposit_list, format_expense_details, format_expense_list};
pub use movement::format_movement_list;

/// Render rows as a table, right-aligning the given columns
pub(crate) fn render_table<T: Tabled>(rows: Vec<T>, right_aligned: &[usize]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    for &column in right_aligned {
        table.modify(Columns::single(column), Alignment::right());
    }
    table.to_string()
}

/// Render an optional text field, `-` when absent
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}
