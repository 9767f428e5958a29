// Database layer — SQLite storage for the catalog, users, and event history.
//
// rusqlite with the "bundled" feature, so there's no system SQLite
// dependency. The database file lives wherever MARQUEE_DB_PATH points
// (defaults to ./marquee.db).
//
// The engine never touches this module: callers fetch snapshots here and
// hand plain data down.

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use traits::Database;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::Connection;

use sqlite::SqliteDatabase;

/// Open (or create) the database, run migrations, and seed the demo catalog.
///
/// This is the main entry point — called by `marquee init`.
pub fn initialize(db_path: &str) -> Result<Arc<dyn Database>> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {db_path}"))?;
        }
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {db_path}"))?;

    // Enable WAL mode for better concurrent read performance
    conn.pragma_update(None, "journal_mode", "WAL")?;

    schema::create_tables(&conn)?;
    schema::seed_demo_data(&conn)?;

    Ok(Arc::new(SqliteDatabase::new(conn)))
}

/// Open an existing database (fails if it doesn't exist yet).
pub fn open(db_path: &str) -> Result<Arc<dyn Database>> {
    if !Path::new(db_path).exists() {
        anyhow::bail!("Database not found at {db_path}. Run `marquee init` first.");
    }

    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {db_path}"))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(Arc::new(SqliteDatabase::new(conn)))
}
