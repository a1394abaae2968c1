//! Table and JSON output formatting for CLI commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use stagehand_core::AppResult;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print rows as a table, or as a JSON array
///
/// `empty` is printed instead of an empty table.
pub fn print_list<T: Serialize + Tabled>(
    rows: &[T],
    format: OutputFormat,
    empty: &str,
) -> AppResult<()> {
    match format {
        OutputFormat::Table if rows.is_empty() => println!("{empty}"),
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

/// Print a single value, debug-formatted or as JSON
pub fn print_item<T: Serialize + std::fmt::Debug>(item: &T, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Table => println!("{item:#?}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    eprintln!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print an aligned key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<20} {value}", format!("{key}:"));
}
