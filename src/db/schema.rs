// Database schema types and query helpers
// Plain functions over &Connection so they run equally inside a Transaction.

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::error::{MovieListError, Result};
use crate::movie::ListName;

// ----- Users -----

/// Insert a user row and return its new userID.
/// A duplicate username surfaces as `Conflict`.
pub fn insert_user(conn: &Connection, username: &str, password: &str) -> Result<i64> {
    let inserted = conn.execute(
        "INSERT INTO users (username, password) VALUES (?1, ?2)",
        params![username, password],
    );

    match inserted {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => {
            Err(MovieListError::Conflict("Username already exists".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Look up a userID by exact username and password
pub fn find_user_id(conn: &Connection, username: &str, password: &str) -> Result<Option<i64>> {
    let id = conn.query_row(
        "SELECT userID FROM users WHERE username = ?1 AND password = ?2",
        params![username, password],
        |row| row.get(0),
    ).optional()?;
    Ok(id)
}

pub fn username_exists(conn: &Connection, username: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)",
        [username],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Delete a user; userMovies rows go with it through the cascade.
/// Returns the number of users removed (0 or 1).
pub fn delete_user(conn: &Connection, user_id: i64) -> Result<usize> {
    let removed = conn.execute("DELETE FROM users WHERE userID = ?1", [user_id])?;
    Ok(removed)
}

// ----- User movies -----

/// A userMovies row with movieData still in stored (serialized) form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMovieRow {
    pub user_movie_id: i64,
    pub user_id: i64,
    pub movie_data: String,
    pub in_favorites: bool,
    pub in_watch_later: bool,
}

/// All rows for a user in insertion order
pub fn list_user_movies(conn: &Connection, user_id: i64) -> Result<Vec<UserMovieRow>> {
    let mut stmt = conn.prepare(
        "SELECT userMovieID, userID, movieData, inFavorites, inWatchLater
         FROM userMovies
         WHERE userID = ?1
         ORDER BY userMovieID"
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok(UserMovieRow {
            user_movie_id: row.get(0)?,
            user_id: row.get(1)?,
            movie_data: row.get(2)?,
            in_favorites: row.get::<_, i32>(3)? != 0,
            in_watch_later: row.get::<_, i32>(4)? != 0,
        })
    })?.collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Create the (userID, movieData) row with both flags off unless it exists.
/// Returns true when this call created it.
pub fn ensure_user_movie(conn: &Connection, user_id: i64, movie_data: &str) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT INTO userMovies (userID, movieData, inFavorites, inWatchLater)
         VALUES (?1, ?2, 0, 0)
         ON CONFLICT (userID, movieData) DO NOTHING",
        params![user_id, movie_data],
    )?;
    Ok(inserted == 1)
}

/// Set one list flag on the (userID, movieData) row. Returns rows touched (0 or 1).
pub fn set_list_flag(
    conn: &Connection,
    user_id: i64,
    movie_data: &str,
    list: ListName,
    value: bool,
) -> Result<usize> {
    let sql = match list {
        ListName::Favorites => {
            "UPDATE userMovies SET inFavorites = ?1 WHERE userID = ?2 AND movieData = ?3"
        }
        ListName::WatchLater => {
            "UPDATE userMovies SET inWatchLater = ?1 WHERE userID = ?2 AND movieData = ?3"
        }
    };

    let updated = conn.execute(sql, params![value as i32, user_id, movie_data])?;
    Ok(updated)
}

pub fn count_user_movies(conn: &Connection, user_id: i64) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM userMovies WHERE userID = ?1",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}
