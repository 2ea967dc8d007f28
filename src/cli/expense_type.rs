//! Expense type CLI commands

use clap::Subcommand;

use crate::display::format_expense_type_list;
use crate::error::ExpenseResult;
use crate::services::ExpenseTypeService;
use crate::storage::Storage;

/// Expense type subcommands
#[derive(Subcommand)]
pub enum TypeCommands {
    /// Create an expense type; its code is assigned automatically
    Create {
        /// Type name
        name: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all expense types
    List,
    /// Edit an expense type
    Edit {
        /// Type code, name or ID
        expense_type: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an unused expense type
    Delete {
        /// Type code, name or ID
        expense_type: String,
    },
}

/// Handle an expense type command
pub fn handle_type_command(storage: &Storage, cmd: TypeCommands) -> ExpenseResult<()> {
    let service = ExpenseTypeService::new(storage);

    match cmd {
        TypeCommands::Create { name, description } => {
            let created = service.create(&name, description.as_deref())?;
            println!("Created expense type: {} {}", created.code, created.name);
            println!("  ID: {}", created.id);
        }

        TypeCommands::List => {
            println!("{}", format_expense_type_list(&service.list()?));
        }

        TypeCommands::Edit {
            expense_type,
            name,
            description,
        } => {
            if name.is_none() && description.is_none() {
                println!("No changes specified. Use --name or --description.");
                return Ok(());
            }

            let found = service.resolve(&expense_type)?;
            let updated = service.update(found.id, name.as_deref(), description.as_deref())?;
            println!("Updated expense type: {} {}", updated.code, updated.name);
        }

        TypeCommands::Delete { expense_type } => {
            let found = service.resolve(&expense_type)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense type: {} {}", deleted.code, deleted.name);
        }
    }

    Ok(())
}
