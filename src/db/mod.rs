// Database module

pub mod migrations;
pub mod schema;

use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::constants::{APP_DB_DIR, APP_DB_FILENAME};
use crate::error::Result;

/// Open or create the database described by `config`, creating its folder if needed.
pub fn open_db(config: &StoreConfig) -> Result<Connection> {
    if let Some(parent) = config.db_path().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut conn = Connection::open(config.db_path())?;
    configure(&conn, config.busy_timeout_ms)?;

    // WAL is not available for in-memory databases, so only file-backed ones get it
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;

    migrations::run_migrations(&mut conn)?;

    Ok(conn)
}

/// Open a private in-memory database with the full schema
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory()?;
    configure(&conn, 0)?;
    migrations::run_migrations(&mut conn)?;
    Ok(conn)
}

/// Per-connection pragmas
fn configure(conn: &Connection, busy_timeout_ms: u32) -> Result<()> {
    // Enable foreign keys (must be done per connection); cascade deletes depend on it
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.execute_batch(&format!("PRAGMA busy_timeout = {};", busy_timeout_ms))?;
    Ok(())
}

/// Get the database path under a home-like root folder
pub fn get_db_path(root: &Path) -> PathBuf {
    root.join(APP_DB_DIR).join(APP_DB_FILENAME)
}
