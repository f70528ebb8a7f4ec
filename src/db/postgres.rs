use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::db::{Store, StoreError, StoreResult};
use crate::models::{
    Artist, ArtistAppearance, ArtistInput, ArtistListing, Show, ShowInput, ShowListing, Venue,
    VenueAppearance, VenueInput, VenueListing,
};

const LIST_VENUES: &str = r#"
    SELECT v.id, v.name, v.city, v.state,
           COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
    FROM venues v
    LEFT JOIN shows s ON s.venue_id = v.id
    GROUP BY v.id
    ORDER BY v.city COLLATE "C", v.state COLLATE "C", v.id
"#;

const SEARCH_VENUES: &str = r#"
    SELECT v.id, v.name, v.city, v.state,
           COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
    FROM venues v
    LEFT JOIN shows s ON s.venue_id = v.id
    WHERE v.name ILIKE $2 ESCAPE '\'
    GROUP BY v.id
    ORDER BY v.id
"#;

const FIND_VENUE: &str = r#"
    SELECT id, name, city, state, address, phone, image_link, facebook_link,
           genres, website, seeking_talent, seeking_description
    FROM venues
    WHERE id = $1
"#;

const VENUE_SHOWS: &str = r#"
    SELECT a.id AS artist_id, a.name AS artist_name,
           a.image_link AS artist_image_link, s.start_time
    FROM shows s
    JOIN artists a ON a.id = s.artist_id
    WHERE s.venue_id = $1
    ORDER BY s.start_time, s.id
"#;

const INSERT_VENUE: &str = r#"
    INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                        genres, website, seeking_talent, seeking_description)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    RETURNING id, name, city, state, address, phone, image_link, facebook_link,
              genres, website, seeking_talent, seeking_description
"#;

const UPDATE_VENUE: &str = r#"
    UPDATE venues
    SET name = $1, city = $2, state = $3, address = $4, phone = $5, image_link = $6,
        facebook_link = $7, genres = $8, website = $9, seeking_talent = $10,
        seeking_description = $11
    WHERE id = $12
    RETURNING id, name, city, state, address, phone, image_link, facebook_link,
              genres, website, seeking_talent, seeking_description
"#;

const LIST_ARTISTS: &str = r#"
    SELECT a.id, a.name,
           COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
    FROM artists a
    LEFT JOIN shows s ON s.artist_id = a.id
    GROUP BY a.id
    ORDER BY a.id
"#;

const SEARCH_ARTISTS: &str = r#"
    SELECT a.id, a.name,
           COUNT(s.id) FILTER (WHERE s.start_time >= $1) AS num_upcoming_shows
    FROM artists a
    LEFT JOIN shows s ON s.artist_id = a.id
    WHERE a.name ILIKE $2 ESCAPE '\'
    GROUP BY a.id
    ORDER BY a.id
"#;

const FIND_ARTIST: &str = r#"
    SELECT id, name, city, state, phone, image_link, facebook_link,
           genres, website, seeking_venue, seeking_description
    FROM artists
    WHERE id = $1
"#;

const ARTIST_SHOWS: &str = r#"
    SELECT v.id AS venue_id, v.name AS venue_name,
           v.image_link AS venue_image_link, s.start_time
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    WHERE s.artist_id = $1
    ORDER BY s.start_time, s.id
"#;

const INSERT_ARTIST: &str = r#"
    INSERT INTO artists (name, city, state, phone, image_link, facebook_link,
                         genres, website, seeking_venue, seeking_description)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
    RETURNING id, name, city, state, phone, image_link, facebook_link,
              genres, website, seeking_venue, seeking_description
"#;

const UPDATE_ARTIST: &str = r#"
    UPDATE artists
    SET name = $1, city = $2, state = $3, phone = $4, image_link = $5,
        facebook_link = $6, genres = $7, website = $8, seeking_venue = $9,
        seeking_description = $10
    WHERE id = $11
    RETURNING id, name, city, state, phone, image_link, facebook_link,
              genres, website, seeking_venue, seeking_description
"#;

const LIST_SHOWS: &str = r#"
    SELECT s.id, s.start_time, v.id AS venue_id, v.name AS venue_name,
           a.id AS artist_id, a.name AS artist_name, a.image_link AS artist_image_link
    FROM shows s
    JOIN venues v ON v.id = s.venue_id
    JOIN artists a ON a.id = s.artist_id
    ORDER BY s.start_time, s.id
"#;

const INSERT_SHOW: &str = r#"
    INSERT INTO shows (venue_id, artist_id, start_time)
    VALUES ($1, $2, $3)
    RETURNING id, start_time, venue_id, artist_id
"#;

/// Connects a pool sized for the request load and applies pending migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Builds an `ILIKE` pattern that matches `term` literally anywhere in the value.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_venues(&self, now: DateTime<Utc>) -> StoreResult<Vec<VenueListing>> {
        let venues = sqlx::query_as::<_, VenueListing>(LIST_VENUES)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    async fn search_venues(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<VenueListing>> {
        let venues = sqlx::query_as::<_, VenueListing>(SEARCH_VENUES)
            .bind(now)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(venues)
    }

    async fn find_venue(&self, id: i32) -> StoreResult<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(FIND_VENUE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venue)
    }

    async fn venue_shows(&self, venue_id: i32) -> StoreResult<Vec<ArtistAppearance>> {
        let shows = sqlx::query_as::<_, ArtistAppearance>(VENUE_SHOWS)
            .bind(venue_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(shows)
    }

    async fn create_venue(&self, input: VenueInput) -> StoreResult<Venue> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(INSERT_VENUE)
            .bind(input.name)
            .bind(input.city)
            .bind(input.state)
            .bind(input.address)
            .bind(input.phone)
            .bind(input.image_link)
            .bind(input.facebook_link)
            .bind(input.genres)
            .bind(input.website)
            .bind(input.seeking_talent)
            .bind(input.seeking_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venue)
    }

    async fn update_venue(&self, id: i32, input: VenueInput) -> StoreResult<Venue> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(UPDATE_VENUE)
            .bind(input.name)
            .bind(input.city)
            .bind(input.state)
            .bind(input.address)
            .bind(input.phone)
            .bind(input.image_link)
            .bind(input.facebook_link)
            .bind(input.genres)
            .bind(input.website)
            .bind(input.seeking_talent)
            .bind(input.seeking_description)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        Ok(venue)
    }

    async fn delete_venue(&self, id: i32) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_artists(&self, now: DateTime<Utc>) -> StoreResult<Vec<ArtistListing>> {
        let artists = sqlx::query_as::<_, ArtistListing>(LIST_ARTISTS)
            .bind(now)
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    async fn search_artists(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> StoreResult<Vec<ArtistListing>> {
        let artists = sqlx::query_as::<_, ArtistListing>(SEARCH_ARTISTS)
            .bind(now)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await?;
        Ok(artists)
    }

    async fn find_artist(&self, id: i32) -> StoreResult<Option<Artist>> {
        let artist = sqlx::query_as::<_, Artist>(FIND_ARTIST)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(artist)
    }

    async fn artist_shows(&self, artist_id: i32) -> StoreResult<Vec<VenueAppearance>> {
        let shows = sqlx::query_as::<_, VenueAppearance>(ARTIST_SHOWS)
            .bind(artist_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(shows)
    }

    async fn create_artist(&self, input: ArtistInput) -> StoreResult<Artist> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(INSERT_ARTIST)
            .bind(input.name)
            .bind(input.city)
            .bind(input.state)
            .bind(input.phone)
            .bind(input.image_link)
            .bind(input.facebook_link)
            .bind(input.genres)
            .bind(input.website)
            .bind(input.seeking_venue)
            .bind(input.seeking_description)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(artist)
    }

    async fn update_artist(&self, id: i32, input: ArtistInput) -> StoreResult<Artist> {
        let mut tx = self.pool.begin().await?;

        let artist = sqlx::query_as::<_, Artist>(UPDATE_ARTIST)
            .bind(input.name)
            .bind(input.city)
            .bind(input.state)
            .bind(input.phone)
            .bind(input.image_link)
            .bind(input.facebook_link)
            .bind(input.genres)
            .bind(input.website)
            .bind(input.seeking_venue)
            .bind(input.seeking_description)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound)?;

        tx.commit().await?;
        Ok(artist)
    }

    async fn delete_artist(&self, id: i32) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    async fn list_shows(&self) -> StoreResult<Vec<ShowListing>> {
        let shows = sqlx::query_as::<_, ShowListing>(LIST_SHOWS)
            .fetch_all(&self.pool)
            .await?;
        Ok(shows)
    }

    async fn create_show(&self, input: ShowInput) -> StoreResult<Show> {
        let mut tx = self.pool.begin().await?;

        let show = sqlx::query_as::<_, Show>(INSERT_SHOW)
            .bind(input.venue_id)
            .bind(input.artist_id)
            .bind(input.start_time)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(show)
    }
}
