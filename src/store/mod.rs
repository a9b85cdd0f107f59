// Movie list store
// The single persistence service: accounts plus per-user favorites / watch-later lists.
// Every public operation is one SQLite transaction on the store's connection.

#[cfg(test)]
mod tests;

use std::sync::Mutex;

use rusqlite::{Connection, TransactionBehavior};

use crate::config::StoreConfig;
use crate::constants::MIN_CREDENTIAL_LEN;
use crate::db::{self, schema};
use crate::error::{MovieListError, Result};
use crate::movie::{ListName, MovieSummary, UserId, UserLists};

/// Thread-safe handle to the movie list database.
/// Share it with `Arc` when several callers need it.
pub struct MovieStore {
    conn: Mutex<Connection>,
}

impl MovieStore {
    /// Open (creating if needed) the database at `config.db_path`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let conn = db::open_db(config)?;
        log::info!("Opened movie store at {}", config.db_path().display());
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Private in-memory store, gone when dropped
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Release the connection and report any error SQLite raises while closing
    pub fn close(self) -> Result<()> {
        let conn = self.conn.into_inner()?;
        conn.close().map_err(|(_, e)| MovieListError::Storage(e))
    }

    // ----- Accounts -----

    /// Register a new account and return its id.
    /// Both fields need at least three characters; usernames are unique (case-sensitive).
    pub fn create_account(&self, username: &str, password: &str) -> Result<UserId> {
        if username.chars().count() < MIN_CREDENTIAL_LEN
            || password.chars().count() < MIN_CREDENTIAL_LEN
        {
            log::warn!("Rejected account creation: credentials too short");
            return Err(MovieListError::Validation(format!(
                "Username and password must be at least {} characters",
                MIN_CREDENTIAL_LEN
            )));
        }

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if schema::username_exists(&tx, username)? {
            log::warn!("Rejected account creation: username '{}' taken", username);
            return Err(MovieListError::Conflict("Username already exists".to_string()));
        }

        let user_id = schema::insert_user(&tx, username, password)?;
        tx.commit()?;

        log::info!("Created account {} ('{}')", user_id, username);
        Ok(UserId(user_id))
    }

    /// Id of the account with exactly these credentials, or `UserId::GUEST` when none matches
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserId> {
        let conn = self.conn.lock()?;
        let id = schema::find_user_id(&conn, username, password)?;
        Ok(id.map(UserId).unwrap_or(UserId::GUEST))
    }

    pub fn account_exists(&self, username: &str) -> Result<bool> {
        let conn = self.conn.lock()?;
        schema::username_exists(&conn, username)
    }

    /// Remove the account and, through the cascade, every list row it owns.
    /// Unknown ids are a no-op.
    pub fn delete_account(&self, user_id: UserId) -> Result<()> {
        if user_id.is_guest() {
            return Ok(());
        }

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let removed = schema::delete_user(&tx, user_id.0)?;
        tx.commit()?;

        if removed > 0 {
            log::info!("Deleted account {}", user_id);
        }
        Ok(())
    }

    // ----- Lists -----

    /// Both lists for a user. Guests and unknown ids get two empty lists.
    pub fn get_user_lists(&self, user_id: UserId) -> Result<UserLists> {
        let mut lists = UserLists::default();
        if user_id.is_guest() {
            return Ok(lists);
        }

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction()?;
        let rows = schema::list_user_movies(&tx, user_id.0)?;
        tx.commit()?;

        // Rows with both flags off are dead entries and never parsed
        for row in rows.iter().filter(|r| r.in_favorites || r.in_watch_later) {
            let movie = MovieSummary::from_movie_data(&row.movie_data)?;
            if row.in_favorites {
                lists.favorites.push(movie.clone());
            }
            if row.in_watch_later {
                lists.watch_later.push(movie);
            }
        }

        Ok(lists)
    }

    /// Put `movie` on `list`, creating the user's row for it on first use. Idempotent.
    pub fn add_to_list(&self, user_id: UserId, movie: &MovieSummary, list: ListName) -> Result<()> {
        if user_id.is_guest() {
            return Ok(());
        }

        let movie_data = movie.to_movie_data()?;

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let created = schema::ensure_user_movie(&tx, user_id.0, &movie_data)?;
        schema::set_list_flag(&tx, user_id.0, &movie_data, list, true)?;
        tx.commit()?;

        log::debug!(
            "Added {} to {} for user {}{}",
            movie.imdb_id,
            list,
            user_id,
            if created { " (new entry)" } else { "" }
        );
        Ok(())
    }

    /// Take `movie` off `list`. No matching row is a no-op; the row itself is kept.
    pub fn remove_from_list(&self, user_id: UserId, movie: &MovieSummary, list: ListName) -> Result<()> {
        if user_id.is_guest() {
            return Ok(());
        }

        let movie_data = movie.to_movie_data()?;

        let mut conn = self.conn.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let updated = schema::set_list_flag(&tx, user_id.0, &movie_data, list, false)?;
        tx.commit()?;

        log::debug!(
            "Removed {} from {} for user {} ({} row)",
            movie.imdb_id,
            list,
            user_id,
            updated
        );
        Ok(())
    }

    /// True when `list` of the user holds a movie with this catalog id
    pub fn list_contains(&self, user_id: UserId, imdb_id: &str, list: ListName) -> Result<bool> {
        Ok(self.get_user_lists(user_id)?.contains(imdb_id, list))
    }

    /// Stored rows for a user, including rows with both flags off
    pub fn entry_count(&self, user_id: UserId) -> Result<usize> {
        if user_id.is_guest() {
            return Ok(0);
        }
        let conn = self.conn.lock()?;
        schema::count_user_movies(&conn, user_id.0)
    }
}
