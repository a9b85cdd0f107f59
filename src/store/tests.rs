// Movie store tests: account contract, list semantics, cascade, concurrency

use super::*;
use std::sync::Arc;
use std::thread;

fn setup_store() -> MovieStore {
    MovieStore::open_in_memory().unwrap()
}

fn dune() -> MovieSummary {
    MovieSummary::new("Dune", "2021", "tt1160419", "p.jpg")
}

fn alien() -> MovieSummary {
    MovieSummary::new("Alien", "1979", "tt0078748", "alien.jpg")
}

// ---------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------

#[test]
fn test_create_then_authenticate_returns_same_id() {
    let store = setup_store();
    let id = store.create_account("alice", "secret").unwrap();
    assert_eq!(store.authenticate("alice", "secret").unwrap(), id);

    let other = store.create_account("bob", "hunter2").unwrap();
    assert_ne!(other, id);
    assert_eq!(store.authenticate("bob", "hunter2").unwrap(), other);
}

#[test]
fn test_duplicate_username_conflicts_regardless_of_password() {
    let store = setup_store();
    store.create_account("alice", "secret").unwrap();

    for password in ["secret", "different"] {
        let err = store.create_account("alice", password).unwrap_err();
        assert!(matches!(err, MovieListError::Conflict(_)), "got {:?}", err);
    }

    // Case-sensitive: a different spelling is a different account
    assert!(store.create_account("Alice", "secret").is_ok());
}

#[test]
fn test_short_credentials_fail_validation() {
    let store = setup_store();

    for (user, pass) in [("al", "secret"), ("alice", "pw"), ("", ""), ("ab", "cd")] {
        let err = store.create_account(user, pass).unwrap_err();
        assert!(matches!(err, MovieListError::Validation(_)), "{}/{}: {:?}", user, pass, err);
    }

    // Nothing was written
    assert!(!store.account_exists("al").unwrap());
    assert!(!store.account_exists("alice").unwrap());

    // Exactly three characters is enough
    assert!(store.create_account("abc", "xyz").is_ok());
}

#[test]
fn test_credential_length_counts_characters() {
    let store = setup_store();

    // Two emoji are four UTF-16 units but only two characters
    let err = store.create_account("\u{1F600}\u{1F600}", "secret").unwrap_err();
    assert!(matches!(err, MovieListError::Validation(_)), "got {:?}", err);
    let err = store.create_account("alice", "\u{e9}\u{e9}").unwrap_err();
    assert!(matches!(err, MovieListError::Validation(_)), "got {:?}", err);

    let id = store.create_account("\u{1F600}\u{1F600}\u{1F600}", "\u{e9}t\u{e9}").unwrap();
    assert_eq!(store.authenticate("\u{1F600}\u{1F600}\u{1F600}", "\u{e9}t\u{e9}").unwrap(), id);
}

#[test]
fn test_authenticate_miss_returns_guest() {
    let store = setup_store();
    store.create_account("alice", "secret").unwrap();

    assert_eq!(store.authenticate("alice", "wrong").unwrap(), UserId::GUEST);
    assert_eq!(store.authenticate("nobody", "secret").unwrap(), UserId::GUEST);
}

#[test]
fn test_account_exists_ignores_password() {
    let store = setup_store();
    assert!(!store.account_exists("alice").unwrap());
    store.create_account("alice", "secret").unwrap();
    assert!(store.account_exists("alice").unwrap());
}

// ---------------------------------------------------------------
// Lists
// ---------------------------------------------------------------

#[test]
fn test_add_to_favorites_is_idempotent() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();
    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();

    let lists = store.get_user_lists(uid).unwrap();
    assert_eq!(lists.favorites, vec![dune()]);
    assert!(lists.watch_later.is_empty());
    assert_eq!(store.entry_count(uid).unwrap(), 1);
}

#[test]
fn test_add_then_remove_excludes_movie() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();
    store.remove_from_list(uid, &dune(), ListName::Favorites).unwrap();

    let lists = store.get_user_lists(uid).unwrap();
    assert!(lists.favorites.is_empty());
    // Dead row is kept, not cleaned up
    assert_eq!(store.entry_count(uid).unwrap(), 1);
}

#[test]
fn test_both_lists_share_one_row() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();
    store.add_to_list(uid, &dune(), ListName::WatchLater).unwrap();

    assert_eq!(store.entry_count(uid).unwrap(), 1);
    let lists = store.get_user_lists(uid).unwrap();
    assert_eq!(lists.favorites, vec![dune()]);
    assert_eq!(lists.watch_later, vec![dune()]);

    // Removing from one list leaves the other
    store.remove_from_list(uid, &dune(), ListName::Favorites).unwrap();
    let lists = store.get_user_lists(uid).unwrap();
    assert!(lists.favorites.is_empty());
    assert_eq!(lists.watch_later, vec![dune()]);
}

#[test]
fn test_remove_without_row_is_noop() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.remove_from_list(uid, &alien(), ListName::WatchLater).unwrap();
    assert_eq!(store.entry_count(uid).unwrap(), 0);
}

#[test]
fn test_lists_are_per_user() {
    let store = setup_store();
    let alice = store.create_account("alice", "secret").unwrap();
    let bob = store.create_account("bob", "secret").unwrap();

    store.add_to_list(alice, &dune(), ListName::Favorites).unwrap();
    store.add_to_list(bob, &alien(), ListName::Favorites).unwrap();

    assert_eq!(store.get_user_lists(alice).unwrap().favorites, vec![dune()]);
    assert_eq!(store.get_user_lists(bob).unwrap().favorites, vec![alien()]);
}

#[test]
fn test_insertion_order_within_list() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.add_to_list(uid, &dune(), ListName::WatchLater).unwrap();
    store.add_to_list(uid, &alien(), ListName::WatchLater).unwrap();

    let lists = store.get_user_lists(uid).unwrap();
    assert_eq!(lists.watch_later, vec![dune(), alien()]);
}

#[test]
fn test_list_contains_by_catalog_id() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();
    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();

    assert!(store.list_contains(uid, "tt1160419", ListName::Favorites).unwrap());
    assert!(!store.list_contains(uid, "tt1160419", ListName::WatchLater).unwrap());
    assert!(!store.list_contains(uid, "tt0078748", ListName::Favorites).unwrap());
}

#[test]
fn test_add_for_unknown_user_is_storage_error() {
    let store = setup_store();
    let err = store.add_to_list(UserId(42), &dune(), ListName::Favorites).unwrap_err();
    assert!(err.is_storage(), "got {:?}", err);
}

// ---------------------------------------------------------------
// Guest sentinel
// ---------------------------------------------------------------

#[test]
fn test_guest_reads_empty_lists() {
    let store = setup_store();
    let lists = store.get_user_lists(UserId::GUEST).unwrap();
    assert!(lists.favorites.is_empty());
    assert!(lists.watch_later.is_empty());
}

#[test]
fn test_guest_writes_are_noops() {
    let store = setup_store();
    store.add_to_list(UserId::GUEST, &dune(), ListName::Favorites).unwrap();
    store.remove_from_list(UserId::GUEST, &dune(), ListName::Favorites).unwrap();
    store.delete_account(UserId::GUEST).unwrap();

    assert!(store.get_user_lists(UserId::GUEST).unwrap().is_empty());
    assert_eq!(store.entry_count(UserId::GUEST).unwrap(), 0);
}

// ---------------------------------------------------------------
// Account deletion
// ---------------------------------------------------------------

#[test]
fn test_delete_account_cascades_to_lists() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();
    store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();
    store.add_to_list(uid, &alien(), ListName::WatchLater).unwrap();

    store.delete_account(uid).unwrap();

    assert_eq!(store.entry_count(uid).unwrap(), 0);
    assert!(store.get_user_lists(uid).unwrap().is_empty());
    assert!(!store.account_exists("alice").unwrap());
    assert_eq!(store.authenticate("alice", "secret").unwrap(), UserId::GUEST);
}

#[test]
fn test_delete_unknown_account_is_noop() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();

    store.delete_account(UserId(999)).unwrap();
    assert!(store.account_exists("alice").unwrap());
    assert_eq!(store.authenticate("alice", "secret").unwrap(), uid);
}

#[test]
fn test_username_reusable_after_delete() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();
    store.delete_account(uid).unwrap();

    let again = store.create_account("alice", "newpass").unwrap();
    assert_ne!(again, uid);
    assert!(store.get_user_lists(again).unwrap().is_empty());
}

// ---------------------------------------------------------------
// Concrete scenario
// ---------------------------------------------------------------

#[test]
fn test_watch_later_scenario() {
    let store = setup_store();
    let uid = store.create_account("alice", "secret").unwrap();
    assert_eq!(uid, UserId(1));

    store.add_to_list(uid, &dune(), ListName::WatchLater).unwrap();
    let lists = store.get_user_lists(uid).unwrap();
    assert!(lists.favorites.is_empty());
    assert_eq!(lists.watch_later.len(), 1);
    assert_eq!(lists.watch_later[0].title, "Dune");

    store.remove_from_list(uid, &dune(), ListName::WatchLater).unwrap();
    let lists = store.get_user_lists(uid).unwrap();
    assert!(lists.favorites.is_empty());
    assert!(lists.watch_later.is_empty());
}

// ---------------------------------------------------------------
// Corruption and lifecycle
// ---------------------------------------------------------------

#[test]
fn test_corrupt_movie_data_surfaces_as_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("movies.db"));
    let store = MovieStore::open(&config).unwrap();
    let uid = store.create_account("alice", "secret").unwrap();
    store.close().unwrap();

    {
        let conn = Connection::open(config.db_path()).unwrap();
        conn.execute(
            "INSERT INTO userMovies (userID, movieData, inFavorites, inWatchLater) VALUES (?1, 'garbage', 1, 0)",
            [uid.0],
        ).unwrap();
    }

    let store = MovieStore::open(&config).unwrap();
    let err = store.get_user_lists(uid).unwrap_err();
    assert!(matches!(err, MovieListError::CorruptMovieData(_)));
    assert!(err.is_storage());
}

#[test]
fn test_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("nested").join("movies.db"));

    let uid = {
        let store = MovieStore::open(&config).unwrap();
        let uid = store.create_account("alice", "secret").unwrap();
        store.add_to_list(uid, &dune(), ListName::Favorites).unwrap();
        store.close().unwrap();
        uid
    };

    let store = MovieStore::open(&config).unwrap();
    assert_eq!(store.authenticate("alice", "secret").unwrap(), uid);
    assert_eq!(store.get_user_lists(uid).unwrap().favorites, vec![dune()]);
}

// ---------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------

#[test]
fn test_concurrent_adds_on_shared_store_create_one_row() {
    let store = Arc::new(setup_store());
    let uid = store.create_account("alice", "secret").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            let list = if i % 2 == 0 { ListName::Favorites } else { ListName::WatchLater };
            thread::spawn(move || store.add_to_list(uid, &dune(), list))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    assert_eq!(store.entry_count(uid).unwrap(), 1);
    let lists = store.get_user_lists(uid).unwrap();
    assert_eq!(lists.favorites, vec![dune()]);
    assert_eq!(lists.watch_later, vec![dune()]);
}

#[test]
fn test_concurrent_adds_across_connections_create_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at(dir.path().join("movies.db"));

    let uid = MovieStore::open(&config).unwrap().create_account("alice", "secret").unwrap();

    // Separate stores mean separate SQLite connections to the same file
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config = config.clone();
            thread::spawn(move || {
                let store = MovieStore::open(&config)?;
                store.add_to_list(uid, &dune(), ListName::Favorites)
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let store = MovieStore::open(&config).unwrap();
    assert_eq!(store.entry_count(uid).unwrap(), 1);
    assert_eq!(store.get_user_lists(uid).unwrap().favorites, vec![dune()]);
}
