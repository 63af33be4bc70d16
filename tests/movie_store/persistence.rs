use movie_store::{
    decode_movies, encode_movies, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore,
    MovieStore, NewMovie, SeedCatalog, StoreConfig, StoreError,
};

use crate::support::RecordingStorage;

#[test]
fn every_change_is_written_before_returning() {
    let storage = RecordingStorage::new();
    let mut store = MovieStore::open(storage.clone()).unwrap();

    store.add(NewMovie::new("Heat", "Crime epic")).unwrap();
    assert_eq!(storage.writes(), 1);
    let stored = decode_movies(&storage.read("movies").unwrap().unwrap()).unwrap();
    assert_eq!(stored, store.list());

    store.rate(6, 8.3).unwrap();
    store.toggle_favorite(6).unwrap();
    store.delete_by_id(1).unwrap();
    assert_eq!(storage.writes(), 4);

    let stored = decode_movies(&storage.read("movies").unwrap().unwrap()).unwrap();
    assert_eq!(stored, store.list());
}

#[test]
fn reopened_store_sees_same_list() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = MovieStore::open(storage.clone()).unwrap();
    store.add(NewMovie::new("Heat", "Crime epic").with_rating(8.3)).unwrap();
    store.toggle_favorite(2).unwrap();
    store.delete_by_id(4).unwrap();

    let reopened = MovieStore::open(storage).unwrap();
    assert_eq!(reopened.list(), store.list());
    assert_eq!(reopened.next_movie_id(), store.next_movie_id());
}

#[test]
fn encoded_list_reloads_into_fresh_store() {
    let mut store = MovieStore::open(InMemoryKeyValueStore::new()).unwrap();
    store.rate(1, 9.5).unwrap();

    let encoded = encode_movies(store.list()).unwrap();
    let fresh = InMemoryKeyValueStore::new();
    fresh.write("movies", &encoded).unwrap();

    let reloaded = MovieStore::open(fresh).unwrap();
    assert_eq!(reloaded.list(), store.list());
}

#[test]
fn counter_after_reload_follows_highest_surviving_id() {
    let storage = InMemoryKeyValueStore::new();
    let mut store = MovieStore::open(storage.clone()).unwrap();
    store.add(NewMovie::new("Heat", "")).unwrap();
    store.delete_by_id(6).unwrap();
    assert_eq!(store.next_movie_id(), 7);

    // The counter is rebuilt from stored ids only.
    let reopened = MovieStore::open(storage).unwrap();
    assert_eq!(reopened.next_movie_id(), 6);
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut store = MovieStore::open(FileKeyValueStore::open(dir.path()).unwrap()).unwrap();
        store.add(NewMovie::new("Heat", "Crime epic")).unwrap();
        store.toggle_favorite(6).unwrap();
    }

    let store = MovieStore::open(FileKeyValueStore::open(dir.path()).unwrap()).unwrap();
    assert_eq!(store.list().len(), 6);
    assert!(store.get(6).unwrap().is_favorite);
    assert_eq!(store.next_movie_id(), 7);

    let raw = std::fs::read_to_string(dir.path().join("movies.json")).unwrap();
    assert!(raw.contains("\"isFavorite\":true"));
}

#[test]
fn failed_write_keeps_mutation_in_memory() {
    let storage = RecordingStorage::new();
    let mut store = MovieStore::open(storage.clone()).unwrap();
    store.rate(1, 7.0).unwrap();

    storage.fail_writes(true);
    let err = store.add(NewMovie::new("Heat", "")).unwrap_err();
    assert!(err.is_persistence_failure());
    assert!(matches!(err, StoreError::Storage(_)));

    assert_eq!(store.list().len(), 6);
    assert_eq!(store.next_movie_id(), 7);

    // The medium still holds the last successful write.
    let stored = decode_movies(&storage.inner().read("movies").unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 5);
    assert_eq!(stored[0].rating, 7.0);

    storage.fail_writes(false);
    store.persist().unwrap();
    let stored = decode_movies(&storage.inner().read("movies").unwrap().unwrap()).unwrap();
    assert_eq!(stored, store.list());
}

#[test]
fn quota_rejection_surfaces_as_storage_error() {
    let mut store = MovieStore::open(InMemoryKeyValueStore::with_quota(64)).unwrap();

    let err = store.toggle_favorite(1).unwrap_err();
    assert!(err.is_persistence_failure());
    assert!(store.get(1).unwrap().is_favorite);
}

#[test]
fn corrupt_stored_value_fails_to_open() {
    let storage = InMemoryKeyValueStore::new();
    storage.write("movies", "[{\"id\":1}]").unwrap();

    let err = MovieStore::open(storage).err().unwrap();
    assert!(matches!(err, StoreError::Codec(_)));
}

#[test]
fn custom_seed_and_key() {
    let storage = InMemoryKeyValueStore::new();
    let config = StoreConfig::new()
        .with_key("watchlist")
        .with_seed(SeedCatalog::Custom(vec![movie_store::Movie::new(
            12, "Heat", "Crime epic", 8.3,
        )]));

    let mut store = MovieStore::open_with(storage.clone(), config).unwrap();
    assert_eq!(store.next_movie_id(), 13);

    store.add(NewMovie::new("Ronin", "")).unwrap();
    assert!(storage.read("movies").unwrap().is_none());
    let stored = decode_movies(&storage.read("watchlist").unwrap().unwrap()).unwrap();
    assert_eq!(stored.iter().map(|m| m.id).collect::<Vec<_>>(), vec![12, 13]);
}
