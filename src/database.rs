//! Database initialization and table definitions
//!
//! Sets up the embedded redb database holding the generated-URL history.
//! The whole persisted state is one entry in one table.

use redb::{Database, TableDefinition};
use std::sync::Arc;

/// Key-value table backing the history store
///
/// Key: fixed storage key (currently only `utm_history`)
/// Value: JSON-serialized array of `UtmResult` records
///
/// Example:
/// - Key: "utm_history"
/// - Value: '[{"originalUrl":"www.example.com","utmUrl":"https://...","timestamp":1700000000000}]'
pub const TABLE_HISTORY: TableDefinition<&str, &str> = TableDefinition::new("history_v1");

/// Application state shared across all request handlers
///
/// Wraps the database in an Arc so the Axum handlers can share it.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,
}

/// Create or open the database file and make sure the history table exists.
///
/// The table is opened inside a committed write transaction so a fresh
/// database file is immediately readable.
///
/// # Example
///
/// ```no_run
/// # use utm_builder::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_HISTORY)?;
    }
    write_txn.commit()?;

    Ok(db)
}
