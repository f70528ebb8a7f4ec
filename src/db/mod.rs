//! Persistence for venues, artists and shows.
//!
//! Handlers only see the [`Store`] trait. [`PgStore`] is the production
//! backend; [`MemoryStore`] enforces the same constraints without a database
//! and backs the HTTP tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Artist, ArtistAppearance, ArtistInput, ArtistListing, Show, ShowInput, ShowListing, Venue,
    VenueAppearance, VenueInput, VenueListing,
};

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Every mutation runs in its own transaction: it either commits completely or
/// leaves the tables untouched.
///
/// "Upcoming" counts include shows starting at or after `now`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Venues ordered by city, state, then id.
    async fn list_venues(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueListing>>;

    /// Case-insensitive substring match on the venue name. An empty term
    /// matches every venue.
    async fn search_venues(&self, term: &str, now: DateTime<Utc>)
        -> StoreResult<Vec<VenueListing>>;

    async fn find_venue(&self, id: i32) -> StoreResult<Option<Venue>>;

    /// Shows hosted by a venue, joined with their artist, ordered by start time.
    async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<ArtistAppearance>>;

    async fn create_venue(&self, input: VenueInput) -> StoreResult<Venue>;

    async fn update_venue(&self, id: i32, input: VenueInput) -> StoreResult<Venue>;

    /// Fails with [`StoreError::ForeignKeyViolation`] while shows still
    /// reference the venue.
    async fn delete_venue(&self, id: i32) -> StoreResult<()>;

    async fn list_artists(&self, now: DateTime<Utc>) -> StoreResult<Vec<ArtistListing>>;

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<ArtistListing>>;

    async fn find_artist(&self, id: i32) -> StoreResult<Option<Artist>>;

    async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<VenueAppearance>>;

    async fn create_artist(&self, input: ArtistInput) -> StoreResult<Artist>;

    async fn update_artist(&self, id: i32, input: ArtistInput) -> StoreResult<Artist>;

    async fn delete_artist(&self, id: i32) -> StoreResult<()>;

    /// Every show joined with its venue and artist, ordered by start time.
    async fn list_shows(&self) -> StoreResult<Vec<ShowListing>>;

    async fn create_show(&self, input: ShowInput) -> StoreResult<Show>;
}
