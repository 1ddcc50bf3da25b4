//! Query commands.

use super::{parse_object, CommandResult};
use goson_core::Database;

/// Runs the find-one command.
pub fn find_one(db: &Database, table: &str, filter: &str) -> CommandResult<()> {
    let filter = parse_object(filter, "filter")?;
    let record = db.find_one(table, &filter)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Runs the find-many command.
pub fn find_many(db: &Database, table: &str, filter: &str) -> CommandResult<()> {
    let filter = parse_object(filter, "filter")?;
    let records = db.find_many(table, &filter)?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goson_core::CoreError;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn queries_print_matches() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("db"));
        db.create_table("users").unwrap();
        db.add_data("users", &json!({"name": "ada"})).unwrap();

        find_one(&db, "users", "{}").unwrap();
        find_many(&db, "users", r#"{"name": "ada"}"#).unwrap();
    }

    #[test]
    fn no_match_is_reported() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("db"));
        db.create_table("users").unwrap();
        db.add_data("users", &json!({"name": "ada"})).unwrap();

        let err = find_many(&db, "users", r#"{"name": "bob"}"#).unwrap_err();
        let core = err.downcast_ref::<CoreError>().unwrap();
        assert!(matches!(core, CoreError::NoMatch { .. }));
    }
}
