//! Create command implementations.

use super::CommandResult;
use goson_core::Database;

/// Runs the create-database command.
pub fn database(db: &Database) -> CommandResult<()> {
    println!("{}", db.create_database()?);
    Ok(())
}

/// Runs the create-table command.
pub fn table(db: &Database, table: &str) -> CommandResult<()> {
    println!("{}", db.create_table(table)?);
    Ok(())
}
