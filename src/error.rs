// Movie Lists Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MovieListError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt movie data: {0}")]
    CorruptMovieData(#[source] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Database schema version {found} is newer than this build supports (max {supported})")]
    SchemaTooNew { found: u32, supported: u32 },

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl MovieListError {
    /// True for infrastructure failures (disk, corruption, I/O, lock poisoning).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            MovieListError::Storage(_)
                | MovieListError::Io(_)
                | MovieListError::CorruptMovieData(_)
                | MovieListError::Poisoned
                | MovieListError::SchemaTooNew { .. }
        )
    }
}

impl<T> From<std::sync::PoisonError<T>> for MovieListError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        MovieListError::Poisoned
    }
}

pub type Result<T> = std::result::Result<T, MovieListError>;
