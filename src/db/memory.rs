use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::{Store, StoreError, StoreResult};
use crate::models::{
    Artist, ArtistAppearance, ArtistInput, ArtistListing, Show, ShowInput, ShowListing, Venue,
    VenueAppearance, VenueInput, VenueListing,
};

#[derive(Debug, Default)]
struct Tables {
    venues: BTreeMap<i32, Venue>,
    artists: BTreeMap<i32, Artist>,
    shows: BTreeMap<i32, Show>,
    last_venue_id: i32,
    last_artist_id: i32,
    last_show_id: i32,
}

impl Tables {
    fn upcoming_at_venue(&self, venue_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.venue_id == venue_id && s.start_time >= now)
            .count() as i64
    }

    fn upcoming_for_artist(&self, artist_id: i32, now: DateTime<Utc>) -> i64 {
        self.shows
            .values()
            .filter(|s| s.artist_id == artist_id && s.start_time >= now)
            .count() as i64
    }

    fn venue_listing(&self, venue: &Venue, now: DateTime<Utc>) -> VenueListing {
        VenueListing {
            id: venue.id,
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            num_upcoming_shows: self.upcoming_at_venue(venue.id, now),
        }
    }

    fn artist_listing(&self, artist: &Artist, now: DateTime<Utc>) -> ArtistListing {
        ArtistListing {
            id: artist.id,
            name: artist.name.clone(),
            num_upcoming_shows: self.upcoming_for_artist(artist.id, now),
        }
    }

    /// Mirrors the `venues_phone_key` unique index; NULL phones never collide.
    fn check_venue_phone(&self, phone: Option<&str>, except_id: Option<i32>) -> StoreResult<()> {
        let Some(phone) = phone else {
            return Ok(());
        };
        let taken = self
            .venues
            .values()
            .any(|v| Some(v.id) != except_id && v.phone.as_deref() == Some(phone));
        if taken {
            return Err(StoreError::UniqueViolation("venues_phone_key".to_string()));
        }
        Ok(())
    }

    fn sorted_shows(&self) -> Vec<&Show> {
        let mut shows: Vec<&Show> = self.shows.values().collect();
        shows.sort_by_key(|s| (s.start_time, s.id));
        shows
    }
}

fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

/// A [`Store`] that keeps every table in memory.
///
/// Constraint behavior follows the PostgreSQL schema: unique venue phones,
/// shows that must reference existing rows, and deletes restricted while
/// shows still point at a venue or artist.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn venue_count(&self) -> usize {
        self.tables.read().await.venues.len()
    }

    pub async fn artist_count(&self) -> usize {
        self.tables.read().await.artists.len()
    }

    pub async fn show_count(&self) -> usize {
        self.tables.read().await.shows.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_venues(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueListing>> {
        let tables = self.tables.read().await;
        let mut venues: Vec<&Venue> = tables.venues.values().collect();
        venues.sort_by(|a, b| (&a.city, &a.state, a.id).cmp(&(&b.city, &b.state, b.id)));
        Ok(venues
            .into_iter()
            .map(|v| tables.venue_listing(v, now))
            .collect())
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<VenueListing>> {
        let tables = self.tables.read().await;
        Ok(tables
            .venues
            .values()
            .filter(|v| name_matches(&v.name, term))
            .map(|v| tables.venue_listing(v, now))
            .collect())
    }

    async fn find_venue(&self, id: i32) -> StoreResult<Option<Venue>> {
        Ok(self.tables.read().await.venues.get(&id).cloned())
    }

    async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<ArtistAppearance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sorted_shows()
            .into_iter()
            .filter(|s| s.venue_id == venue_id)
            .filter_map(|s| {
                tables.artists.get(&s.artist_id).map(|a| ArtistAppearance {
                    artist_id: a.id,
                    artist_name: a.name.clone(),
                    artist_image_link: a.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn create_venue(&self, input: VenueInput) -> StoreResult<Venue> {
        let mut tables = self.tables.write().await;
        tables.check_venue_phone(input.phone.as_deref(), None)?;

        tables.last_venue_id += 1;
        let venue = input.into_venue(tables.last_venue_id);
        tables.venues.insert(venue.id, venue.clone());
        Ok(venue)
    }

    async fn update_venue(&self, id: i32, input: VenueInput) -> StoreResult<Venue> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        tables.check_venue_phone(input.phone.as_deref(), Some(id))?;

        let venue = input.into_venue(id);
        tables.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn delete_venue(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.shows.values().any(|s| s.venue_id == id) {
            return Err(StoreError::ForeignKeyViolation(
                "shows_venue_id_fkey".to_string(),
            ));
        }
        tables.venues.remove(&id);
        Ok(())
    }

    async fn list_artists(&self, now: DateTime<Utc>) -> StoreResult<Vec<ArtistListing>> {
        let tables = self.tables.read().await;
        Ok(tables
            .artists
            .values()
            .map(|a| tables.artist_listing(a, now))
            .collect())
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<ArtistListing>> {
        let tables = self.tables.read().await;
        Ok(tables
            .artists
            .values()
            .filter(|a| name_matches(&a.name, term))
            .map(|a| tables.artist_listing(a, now))
            .collect())
    }

    async fn find_artist(&self, id: i32) -> StoreResult<Option<Artist>> {
        Ok(self.tables.read().await.artists.get(&id).cloned())
    }

    async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<VenueAppearance>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sorted_shows()
            .into_iter()
            .filter(|s| s.artist_id == artist_id)
            .filter_map(|s| {
                tables.venues.get(&s.venue_id).map(|v| VenueAppearance {
                    venue_id: v.id,
                    venue_name: v.name.clone(),
                    venue_image_link: v.image_link.clone(),
                    start_time: s.start_time,
                })
            })
            .collect())
    }

    async fn create_artist(&self, input: ArtistInput) -> StoreResult<Artist> {
        let mut tables = self.tables.write().await;
        tables.last_artist_id += 1;
        let artist = input.into_artist(tables.last_artist_id);
        tables.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn update_artist(&self, id: i32, input: ArtistInput) -> StoreResult<Artist> {
        let mut tables = self.tables.write().await;
        if !tables.artists.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        let artist = input.into_artist(id);
        tables.artists.insert(id, artist.clone());
        Ok(artist)
    }

    async fn delete_artist(&self, id: i32) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.artists.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if tables.shows.values().any(|s| s.artist_id == id) {
            return Err(StoreError::ForeignKeyViolation(
                "shows_artist_id_fkey".to_string(),
            ));
        }
        tables.artists.remove(&id);
        Ok(())
    }

    async fn list_shows(&self) -> StoreResult<Vec<ShowListing>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sorted_shows()
            .into_iter()
            .filter_map(|s| {
                let venue = tables.venues.get(&s.venue_id)?;
                let artist = tables.artists.get(&s.artist_id)?;
                Some(ShowListing {
                    id: s.id,
                    start_time: s.start_time,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                })
            })
            .collect())
    }

    async fn create_show(&self, input: ShowInput) -> StoreResult<Show> {
        let mut tables = self.tables.write().await;
        if !tables.venues.contains_key(&input.venue_id) {
            return Err(StoreError::ForeignKeyViolation(
                "shows_venue_id_fkey".to_string(),
            ));
        }
        if !tables.artists.contains_key(&input.artist_id) {
            return Err(StoreError::ForeignKeyViolation(
                "shows_artist_id_fkey".to_string(),
            ));
        }

        tables.last_show_id += 1;
        let show = Show {
            id: tables.last_show_id,
            start_time: input.start_time,
            venue_id: input.venue_id,
            artist_id: input.artist_id,
        };
        tables.shows.insert(show.id, show.clone());
        Ok(show)
    }
}
