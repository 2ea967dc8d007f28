//! Export CLI commands

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::error::ExpenseResult;
use crate::export::{default_export_filename, export_movements_csv};
use crate::reports::MovementReport;
use crate::storage::Storage;

use super::movements::MovementArgs;

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export movements to CSV
    Movements {
        /// Output file ("-" for stdout). Defaults to movimientos_<today>.csv
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filter: MovementArgs,
    },
}

/// Handle an export command
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> ExpenseResult<()> {
    match cmd {
        ExportCommands::Movements { output, filter } => {
            let report = MovementReport::generate(storage, &filter.to_filter(storage)?)?;

            let path = output
                .unwrap_or_else(|| PathBuf::from(default_export_filename(Local::now().date_naive())));

            if path.as_os_str() == "-" {
                export_movements_csv(&report.movements, io::stdout().lock())?;
            } else {
                let file = File::create(&path)?;
                export_movements_csv(&report.movements, BufWriter::new(file))?;
                println!(
                    "Exported {} movements to {}",
                    report.movements.len(),
                    path.display()
                );
            }
        }
    }

    Ok(())
}
