// Movie Lists - Library Entry Point

pub mod constants;
pub mod error;
pub mod config;
pub mod db;
pub mod movie;
pub mod store;
pub mod session;
pub mod catalog;

pub use config::StoreConfig;
pub use error::{MovieListError, Result};
pub use movie::{ListName, MovieSummary, UserId, UserLists};
pub use session::{DisplayOptions, Session};
pub use store::MovieStore;
