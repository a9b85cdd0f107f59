// Movie list types
// MovieSummary is the list-membership key; its JSON form is stored verbatim in userMovies.movieData.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::GUEST_USER_ID;
use crate::error::{MovieListError, Result};

/// Row id of a `users` entry. `UserId::GUEST` stands for "not logged in".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    pub const GUEST: UserId = UserId(GUEST_USER_ID);

    pub fn is_guest(self) -> bool {
        self == Self::GUEST
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Minimal movie record. Field order here is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Poster")]
    pub poster: String,
}

impl MovieSummary {
    pub fn new(
        title: impl Into<String>,
        year: impl Into<String>,
        imdb_id: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
            imdb_id: imdb_id.into(),
            poster: poster.into(),
        }
    }

    /// Canonical movieData string. Equal strings mean equal records.
    pub fn to_movie_data(&self) -> Result<String> {
        serde_json::to_string(self).map_err(MovieListError::CorruptMovieData)
    }

    pub fn from_movie_data(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(MovieListError::CorruptMovieData)
    }
}

/// The two per-user lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListName {
    Favorites,
    WatchLater,
}

impl ListName {
    pub const ALL: [ListName; 2] = [ListName::Favorites, ListName::WatchLater];

    pub fn as_str(self) -> &'static str {
        match self {
            ListName::Favorites => "favorites",
            ListName::WatchLater => "watch-later",
        }
    }
}

impl fmt::Display for ListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListName {
    type Err = MovieListError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "favorites" | "inFavorites" => Ok(ListName::Favorites),
            "watch-later" | "watchLater" | "inWatchLater" => Ok(ListName::WatchLater),
            other => Err(MovieListError::Validation(format!(
                "Unknown list '{}' (expected favorites or watch-later)",
                other
            ))),
        }
    }
}

/// A user's lists, partitioned by flag. A movie may appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLists {
    pub favorites: Vec<MovieSummary>,
    pub watch_later: Vec<MovieSummary>,
}

impl UserLists {
    pub fn list(&self, list: ListName) -> &[MovieSummary] {
        match list {
            ListName::Favorites => &self.favorites,
            ListName::WatchLater => &self.watch_later,
        }
    }

    pub fn contains(&self, imdb_id: &str, list: ListName) -> bool {
        self.list(list).iter().any(|m| m.imdb_id == imdb_id)
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.watch_later.is_empty()
    }
}
