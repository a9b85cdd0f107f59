// Movie Lists CLI binary

use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use anyhow::Result;

use movie_lists_lib::{ListName, MovieStore, MovieSummary, StoreConfig, UserId};

#[derive(Parser)]
#[command(name = "movielists")]
#[command(about = "Movie Lists - favorites and watch-later lists per account", long_about = None)]
#[command(version)]
struct Cli {
    /// Database file (defaults to $MOVIELISTS_DB or ~/.movielists/movies.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        username: String,
        password: String,
    },

    /// Look up the account id for a username and password
    Login {
        username: String,
        password: String,
    },

    /// Check whether a username is taken
    Exists {
        username: String,
    },

    /// Show a user's favorites and watch-later lists
    Lists {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },

    /// Add a movie to a list
    Add {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
        /// favorites or watch-later
        list: ListName,
        #[command(flatten)]
        movie: MovieArgs,
    },

    /// Remove a movie from a list
    Remove {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
        /// favorites or watch-later
        list: ListName,
        #[command(flatten)]
        movie: MovieArgs,
    },

    /// Delete an account and all of its list entries
    DeleteAccount {
        #[arg(allow_hyphen_values = true)]
        user_id: i64,
    },
}

#[derive(Args)]
struct MovieArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    year: String,
    #[arg(long)]
    imdb_id: String,
    #[arg(long, default_value = "N/A")]
    poster: String,
}

impl MovieArgs {
    fn summary(self) -> MovieSummary {
        MovieSummary::new(self.title, self.year, self.imdb_id, self.poster)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match cli.db {
        Some(path) => StoreConfig::at(path),
        None => StoreConfig::default_location()?,
    };
    let store = MovieStore::open(&config)?;

    let result = match cli.command {
        Commands::Register { username, password } => cmd_register(&store, &username, &password),
        Commands::Login { username, password } => cmd_login(&store, &username, &password),
        Commands::Exists { username } => cmd_exists(&store, &username),
        Commands::Lists { user_id } => cmd_lists(&store, UserId(user_id)),
        Commands::Add { user_id, list, movie } => {
            store.add_to_list(UserId(user_id), &movie.summary(), list)?;
            println!("Added to {}", list);
            Ok(())
        }
        Commands::Remove { user_id, list, movie } => {
            store.remove_from_list(UserId(user_id), &movie.summary(), list)?;
            println!("Removed from {}", list);
            Ok(())
        }
        Commands::DeleteAccount { user_id } => {
            store.delete_account(UserId(user_id))?;
            println!("Deleted account {}", user_id);
            Ok(())
        }
    };

    store.close()?;
    result
}

fn cmd_register(store: &MovieStore, username: &str, password: &str) -> Result<()> {
    let user_id = store.create_account(username, password)?;
    println!("Created account '{}' with id {}", username, user_id);
    Ok(())
}

fn cmd_login(store: &MovieStore, username: &str, password: &str) -> Result<()> {
    let user_id = store.authenticate(username, password)?;
    if user_id.is_guest() {
        println!("No account found associated with credentials");
    } else {
        println!("{}", user_id);
    }
    Ok(())
}

fn cmd_exists(store: &MovieStore, username: &str) -> Result<()> {
    if store.account_exists(username)? {
        println!("Username '{}' is taken", username);
    } else {
        println!("Username '{}' is available", username);
    }
    Ok(())
}

fn cmd_lists(store: &MovieStore, user_id: UserId) -> Result<()> {
    let lists = store.get_user_lists(user_id)?;

    for list in ListName::ALL {
        let movies = lists.list(list);
        println!("{} ({})", list, movies.len());
        if movies.is_empty() {
            println!("  (empty)");
        }
        for movie in movies {
            println!("  {:<12} {:>4}  {}", movie.imdb_id, movie.year, movie.title);
        }
    }

    Ok(())
}
