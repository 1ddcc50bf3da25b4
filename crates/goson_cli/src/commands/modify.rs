//! Record modification commands.

use super::{parse_object, CommandResult};
use goson_core::Database;

/// Runs the add command.
pub fn add(db: &Database, table: &str, record: &str) -> CommandResult<()> {
    let record = parse_object(record, "record")?;
    db.add_data(table, &record)?;
    println!("Data added to {table} successfully.");
    Ok(())
}

/// Runs the update command.
pub fn update(db: &Database, table: &str, index: isize, patch: &str) -> CommandResult<()> {
    let patch = parse_object(patch, "patch")?;
    db.update_data(table, index, &patch)?;
    println!("Data updated in {table} successfully.");
    Ok(())
}

/// Runs the delete command.
pub fn delete(db: &Database, table: &str, index: isize) -> CommandResult<()> {
    db.delete_data(table, index)?;
    println!("Data deleted from {table} successfully.");
    Ok(())
}
