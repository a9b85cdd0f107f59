// Store configuration
// Where the database lives and how long writers wait on a busy database.

use std::path::{Path, PathBuf};

use crate::constants::{DB_PATH_ENV, DEFAULT_BUSY_TIMEOUT_MS};
use crate::db::get_db_path;
use crate::error::{MovieListError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u32,
}

impl StoreConfig {
    /// Config for an explicit database file.
    pub fn at(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// `$MOVIELISTS_DB` if set, otherwise ~/.movielists/movies.db
    pub fn default_location() -> Result<Self> {
        if let Some(path) = std::env::var_os(DB_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::at(PathBuf::from(path)));
        }

        let home = directories::BaseDirs::new()
            .ok_or_else(|| MovieListError::Config("Could not determine home directory".to_string()))?;
        Ok(Self::at(get_db_path(home.home_dir())))
    }

    pub fn with_busy_timeout(mut self, busy_timeout_ms: u32) -> Self {
        self.busy_timeout_ms = busy_timeout_ms;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
