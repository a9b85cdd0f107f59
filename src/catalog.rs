// Catalog collaborator seam
// The remote movie catalog (OMDb-style) lives outside this crate. This module fixes the
// trait callers implement and decodes the catalog's JSON payloads into our types.

use serde::{Deserialize, Serialize};

use crate::error::{MovieListError, Result};
use crate::movie::MovieSummary;

/// Remote movie lookups. Implementations own transport, keys and paging.
pub trait CatalogClient {
    /// Up to one page of titles similar to `title`
    fn search(&self, title: &str, page: u32) -> Result<Vec<SearchHit>>;

    fn details(&self, imdb_id: &str) -> Result<MovieDetails>;
}

/// One search result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl SearchHit {
    /// The list-membership key for this hit (drops `Type`)
    pub fn summary(&self) -> MovieSummary {
        MovieSummary::new(&self.title, &self.year, &self.imdb_id, &self.poster)
    }
}

/// Detail fields shown on the movie screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MovieDetails {
    pub title: String,
    pub released: String,
    pub runtime: String,
    pub genre: String,
    pub director: String,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub box_office: String,
    pub poster: String,
}

impl MovieDetails {
    /// Value of a detail field by its catalog key (e.g. "BoxOffice")
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "Title" => &self.title,
            "Released" => &self.released,
            "Runtime" => &self.runtime,
            "Genre" => &self.genre,
            "Director" => &self.director,
            "Plot" => &self.plot,
            "Language" => &self.language,
            "Country" => &self.country,
            "BoxOffice" => &self.box_office,
            "Poster" => &self.poster,
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(rename = "Search", default)]
    search: Vec<SearchHit>,
}

/// Catalog query form of a title: trimmed, whitespace runs become '+'
pub fn search_query(title: &str) -> String {
    title.split_whitespace().collect::<Vec<_>>().join("+")
}

pub fn parse_search_response(json: &str) -> Result<Vec<SearchHit>> {
    check_response(json)?;
    let payload: SearchPayload = serde_json::from_str(json).map_err(catalog_json_error)?;
    Ok(payload.search)
}

pub fn parse_details_response(json: &str) -> Result<MovieDetails> {
    check_response(json)?;
    let mut details: MovieDetails = serde_json::from_str(json).map_err(catalog_json_error)?;
    details.released = normalize_release_date(&details.released);
    Ok(details)
}

/// "16 Jul 2010" -> "Jul 16, 2010". Anything else is returned unchanged.
pub fn normalize_release_date(released: &str) -> String {
    let parts: Vec<&str> = released.split(' ').collect();
    match parts.as_slice() {
        [day, month, year]
            if day.chars().all(|c| c.is_ascii_digit())
                && month.chars().all(|c| c.is_ascii_alphabetic())
                && year.chars().all(|c| c.is_ascii_digit()) =>
        {
            format!("{} {}, {}", month, day, year)
        }
        _ => released.to_string(),
    }
}

fn check_response(json: &str) -> Result<()> {
    let envelope: Envelope = serde_json::from_str(json).map_err(catalog_json_error)?;
    if envelope.response == "False" {
        let message = envelope.error.unwrap_or_else(|| "Unknown catalog error".to_string());
        log::warn!("Catalog returned an error: {}", message);
        return Err(MovieListError::Catalog(message));
    }
    Ok(())
}

fn catalog_json_error(err: serde_json::Error) -> MovieListError {
    MovieListError::Catalog(format!("Malformed catalog response: {}", err))
}
