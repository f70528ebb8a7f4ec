//! Constraint behavior of the PostgreSQL store.
//!
//! Needs a running server: `DATABASE_URL=postgres://... cargo test -- --ignored`

mod common;

use chrono::{Duration, SubsecRound, Utc};
use fyyur_server::db::{MemoryStore, PgStore, Store, StoreError};
use fyyur_server::models::{ShowInput, VenueListing};
use sqlx::PgPool;

use common::{artist_input, venue_input};

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_duplicate_phone_is_unique_violation(pool: PgPool) {
    let store = PgStore::new(pool);

    let mut first = venue_input("The Musical Hop", "San Francisco", "CA");
    first.phone = Some("123-123-1234".to_string());
    store.create_venue(first).await.unwrap();

    let mut second = venue_input("Copycat Hall", "Oakland", "CA");
    second.phone = Some("123-123-1234".to_string());
    let err = store.create_venue(second).await.unwrap_err();

    assert!(matches!(err, StoreError::UniqueViolation(_)));
    assert!(store
        .search_venues("copycat", Utc::now())
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_delete_with_shows_is_restricted(pool: PgPool) {
    let store = PgStore::new(pool);
    let venue = store
        .create_venue(venue_input("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = store
        .create_artist(artist_input("Guns N Petals"))
        .await
        .unwrap();
    store
        .create_show(ShowInput {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time: Utc::now() + Duration::days(3),
        })
        .await
        .unwrap();

    let err = store.delete_venue(venue.id).await.unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    assert!(store.find_venue(venue.id).await.unwrap().is_some());

    let listings = store.list_venues(Utc::now()).await.unwrap();
    assert_eq!(listings[0].num_upcoming_shows, 1);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    let store = PgStore::new(pool);
    store
        .create_artist(artist_input("100% Pure"))
        .await
        .unwrap();
    store
        .create_artist(artist_input("1000 Pure"))
        .await
        .unwrap();

    let found = store.search_artists("100%", Utc::now()).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Pure");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_show_for_unknown_venue_is_foreign_key_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    let artist = store
        .create_artist(artist_input("Guns N Petals"))
        .await
        .unwrap();

    let err = store
        .create_show(ShowInput {
            venue_id: 404,
            artist_id: artist.id,
            start_time: Utc::now(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_venue_areas_sort_bytewise_like_memory_store(pool: PgPool) {
    let pg = PgStore::new(pool);
    let memory = MemoryStore::new();
    for (name, city, state) in [
        ("Lowercase Lounge", "boston", "MA"),
        ("The Musical Hop", "San Francisco", "CA"),
        ("Harbor Hall", "Boston", "MA"),
        ("Accent Club", "\u{c9}vora", "NY"),
    ] {
        pg.create_venue(venue_input(name, city, state)).await.unwrap();
        memory.create_venue(venue_input(name, city, state)).await.unwrap();
    }

    let now = Utc::now();
    let cities = |listings: Vec<VenueListing>| -> Vec<String> {
        listings.into_iter().map(|v| v.city).collect()
    };
    let from_pg = cities(pg.list_venues(now).await.unwrap());
    let from_memory = cities(memory.list_venues(now).await.unwrap());

    assert_eq!(from_pg, vec!["Boston", "San Francisco", "boston", "\u{c9}vora"]);
    assert_eq!(from_pg, from_memory);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL"]
async fn test_show_starting_now_counts_as_upcoming(pool: PgPool) {
    let store = PgStore::new(pool);
    let venue = store
        .create_venue(venue_input("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let artist = store
        .create_artist(artist_input("Guns N Petals"))
        .await
        .unwrap();
    let now = Utc::now().trunc_subsecs(6);
    for start_time in [now - Duration::seconds(1), now, now + Duration::days(1)] {
        store
            .create_show(ShowInput {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time,
            })
            .await
            .unwrap();
    }

    let venues = store.list_venues(now).await.unwrap();
    assert_eq!(venues[0].num_upcoming_shows, 2);
    let artists = store.list_artists(now).await.unwrap();
    assert_eq!(artists[0].num_upcoming_shows, 2);
}
