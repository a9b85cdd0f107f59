// Movie Lists Constants

// Accounts
pub const MIN_CREDENTIAL_LEN: usize = 3;
pub const GUEST_USER_ID: i64 = -1;

// Paths
pub const APP_DB_DIR: &str = ".movielists";
pub const APP_DB_FILENAME: &str = "movies.db";
pub const DB_PATH_ENV: &str = "MOVIELISTS_DB";

// Connection
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

// Catalog detail fields, in display order
pub const DETAIL_FIELDS: [&str; 9] = [
    "Title", "Released", "Runtime", "Genre", "Director",
    "Plot", "Language", "Country", "BoxOffice",
];
