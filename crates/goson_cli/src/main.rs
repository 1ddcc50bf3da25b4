//! GoSon CLI
//!
//! Command-line front-end for GoSon databases.
//!
//! # Commands
//!
//! - `create-database` / `create-table` - Create the directory or a table file
//! - `add` / `update` / `delete` - Modify records
//! - `find-one` / `find-many` - Query records with an equality filter
//!
//! Records, patches and filters are given as JSON objects. In patches and
//! filters a `null` member means "not specified".

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// GoSon embedded JSON database tool.
#[derive(Parser)]
#[command(name = "goson")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the database directory
    #[arg(global = true, short, long)]
    database: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database directory
    CreateDatabase,

    /// Create an empty table
    CreateTable {
        /// Table name (case-insensitive)
        table: String,
    },

    /// Append a record to a table
    Add {
        /// Table name
        table: String,
        /// Record as a JSON object
        record: String,
    },

    /// Merge a patch into the record at an index
    Update {
        /// Table name
        table: String,
        /// Record position
        #[arg(allow_hyphen_values = true)]
        index: isize,
        /// Patch as a JSON object declaring every field of the record
        patch: String,
    },

    /// Delete the record at an index
    Delete {
        /// Table name
        table: String,
        /// Record position
        #[arg(allow_hyphen_values = true)]
        index: isize,
    },

    /// Print the first record matching a filter
    FindOne {
        /// Table name
        table: String,
        /// Filter as a JSON object (all records when omitted)
        #[arg(default_value = "{}")]
        filter: String,
    },

    /// Print every record matching a filter
    FindMany {
        /// Table name
        table: String,
        /// Filter as a JSON object (all records when omitted)
        #[arg(default_value = "{}")]
        filter: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("GoSon CLI v{}", env!("CARGO_PKG_VERSION"));
        println!("GoSon Core v{}", goson_core::VERSION);
        return Ok(());
    }

    let path = cli.database.ok_or("Database path required (--database)")?;
    let db = goson_core::Database::new(&path);

    match cli.command {
        Commands::CreateDatabase => commands::create::database(&db)?,
        Commands::CreateTable { table } => commands::create::table(&db, &table)?,
        Commands::Add { table, record } => commands::modify::add(&db, &table, &record)?,
        Commands::Update {
            table,
            index,
            patch,
        } => commands::modify::update(&db, &table, index, &patch)?,
        Commands::Delete { table, index } => commands::modify::delete(&db, &table, index)?,
        Commands::FindOne { table, filter } => commands::query::find_one(&db, &table, &filter)?,
        Commands::FindMany { table, filter } => commands::query::find_many(&db, &table, &filter)?,
        Commands::Version => {}
    }

    Ok(())
}
