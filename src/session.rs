// Application session state
// Who is logged in, their cached lists, and which detail fields to show.
// The store stays the source of truth: every write reloads the cache from it.

use serde::{Deserialize, Serialize};

use crate::constants::DETAIL_FIELDS;
use crate::error::{MovieListError, Result};
use crate::movie::{ListName, MovieSummary, UserId, UserLists};
use crate::store::MovieStore;

/// Which catalog detail fields the detail view shows, in `DETAIL_FIELDS` order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    enabled: [bool; DETAIL_FIELDS.len()],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        let mut enabled = [false; DETAIL_FIELDS.len()];
        for field in ["Title", "Released", "Director", "Runtime", "Plot"] {
            if let Some(i) = field_index(field) {
                enabled[i] = true;
            }
        }
        Self { enabled }
    }
}

impl DisplayOptions {
    pub fn is_enabled(&self, field: &str) -> bool {
        field_index(field).map(|i| self.enabled[i]).unwrap_or(false)
    }

    /// Flip a field on or off and return its new state
    pub fn toggle(&mut self, field: &str) -> Result<bool> {
        let i = field_index(field)
            .ok_or_else(|| MovieListError::Validation(format!("Unknown detail field '{}'", field)))?;
        self.enabled[i] = !self.enabled[i];
        Ok(self.enabled[i])
    }

    pub fn enabled_fields(&self) -> Vec<&'static str> {
        DETAIL_FIELDS
            .iter()
            .zip(self.enabled.iter())
            .filter(|(_, on)| **on)
            .map(|(field, _)| *field)
            .collect()
    }
}

fn field_index(field: &str) -> Option<usize> {
    DETAIL_FIELDS.iter().position(|f| *f == field)
}

/// Top-level app state. Borrow one per open store.
pub struct Session<'a> {
    store: &'a MovieStore,
    user_id: UserId,
    lists: UserLists,
    display: DisplayOptions,
}

impl<'a> Session<'a> {
    /// Start as a guest
    pub fn new(store: &'a MovieStore) -> Self {
        Self {
            store,
            user_id: UserId::GUEST,
            lists: UserLists::default(),
            display: DisplayOptions::default(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is_logged_in(&self) -> bool {
        !self.user_id.is_guest()
    }

    /// Create an account and log into it
    pub fn register(&mut self, username: &str, password: &str) -> Result<UserId> {
        let user_id = self.store.create_account(username, password)?;
        self.switch_user(user_id)?;
        Ok(user_id)
    }

    /// Log in with credentials. A miss leaves the session unchanged and returns false.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool> {
        let user_id = self.store.authenticate(username, password)?;
        if user_id.is_guest() {
            return Ok(false);
        }
        self.switch_user(user_id)?;
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.switch_user(UserId::GUEST)
    }

    /// Delete the logged-in account and fall back to guest
    pub fn delete_account(&mut self) -> Result<()> {
        self.store.delete_account(self.user_id)?;
        self.logout()
    }

    pub fn add(&mut self, movie: &MovieSummary, list: ListName) -> Result<()> {
        if !self.is_logged_in() {
            return Ok(());
        }
        self.store.add_to_list(self.user_id, movie, list)?;
        self.reload()
    }

    pub fn remove(&mut self, movie: &MovieSummary, list: ListName) -> Result<()> {
        if !self.is_logged_in() {
            return Ok(());
        }
        self.store.remove_from_list(self.user_id, movie, list)?;
        self.reload()
    }

    pub fn favorites(&self) -> &[MovieSummary] {
        &self.lists.favorites
    }

    pub fn watch_later(&self) -> &[MovieSummary] {
        &self.lists.watch_later
    }

    pub fn contains(&self, imdb_id: &str, list: ListName) -> bool {
        self.lists.contains(imdb_id, list)
    }

    pub fn display_options(&self) -> &DisplayOptions {
        &self.display
    }

    pub fn display_options_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    /// Re-read both lists from the store
    pub fn reload(&mut self) -> Result<()> {
        self.lists = self.store.get_user_lists(self.user_id)?;
        Ok(())
    }

    fn switch_user(&mut self, user_id: UserId) -> Result<()> {
        self.user_id = user_id;
        self.reload()
    }
}
