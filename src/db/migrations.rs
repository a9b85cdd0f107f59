// Database migrations
// Migrations are forward-only. Never edit or delete a migration after it ships.

use rusqlite::Connection;

use crate::error::{MovieListError, Result};

/// All migrations in order. Each migration is a SQL string.
const MIGRATIONS: &[&str] = &[
    // Migration 1: accounts and per-user movie lists
    r#"
    CREATE TABLE IF NOT EXISTS users (
        userID INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS userMovies (
        userMovieID INTEGER PRIMARY KEY AUTOINCREMENT,
        userID INTEGER NOT NULL,
        movieData TEXT NOT NULL,
        inFavorites INTEGER NOT NULL DEFAULT 0 CHECK (inFavorites IN (0, 1)),
        inWatchLater INTEGER NOT NULL DEFAULT 0 CHECK (inWatchLater IN (0, 1)),
        FOREIGN KEY (userID) REFERENCES users (userID)
            ON DELETE CASCADE,
        UNIQUE (userID, movieData)
    );

    CREATE INDEX IF NOT EXISTS idx_user_movies_user ON userMovies(userID);
    "#,
];

/// Get current schema version from database
pub fn get_schema_version(conn: &Connection) -> Result<u32> {
    let version: u32 = conn.query_row(
        "PRAGMA user_version",
        [],
        |row| row.get(0)
    )?;
    Ok(version)
}

/// Highest schema version this build knows about
pub fn latest_version() -> u32 {
    MIGRATIONS.len() as u32
}

/// Run all pending migrations. Each one commits together with its version bump.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    let target_version = latest_version();

    // Refuse to open a DB created by a newer build
    if current_version > target_version {
        return Err(MovieListError::SchemaTooNew {
            found: current_version,
            supported: target_version,
        });
    }

    if current_version == target_version {
        return Ok(());
    }

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as u32;
        if migration_version <= current_version {
            continue;
        }

        let tx = conn.transaction()?;
        tx.execute_batch(migration)?;
        tx.execute_batch(&format!("PRAGMA user_version = {}", migration_version))?;
        tx.commit()?;

        log::info!("Applied migration {}", migration_version);
    }

    Ok(())
}
