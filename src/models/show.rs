use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Show {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub venue_id: i32,
    pub artist_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i32,
    pub artist_id: i32,
    pub start_time: DateTime<Utc>,
}

/// One row of the `/shows` page: a show flattened with its venue and artist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShowListing {
    pub id: i32,
    pub start_time: DateTime<Utc>,
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

/// A show seen from a venue page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ArtistAppearance {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show seen from an artist page.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueAppearance {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for ArtistAppearance {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for VenueAppearance {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Shows split around a single instant.
///
/// A show starting strictly before `now` is past; everything else, including a
/// show starting exactly at `now`, is upcoming.
#[derive(Debug, Clone, Serialize)]
pub struct Schedule<T> {
    pub past_shows: Vec<T>,
    pub upcoming_shows: Vec<T>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T: Scheduled> Schedule<T> {
    pub fn partition(shows: impl IntoIterator<Item = T>, now: DateTime<Utc>) -> Self {
        let (mut past_shows, mut upcoming_shows): (Vec<T>, Vec<T>) =
            shows.into_iter().partition(|show| show.start_time() < now);

        past_shows.sort_by_key(|show| show.start_time());
        upcoming_shows.sort_by_key(|show| show.start_time());

        Self {
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn appearance(name: &str, start_time: DateTime<Utc>) -> ArtistAppearance {
        ArtistAppearance {
            artist_id: 1,
            artist_name: name.to_string(),
            artist_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_partition_splits_around_now() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap();
        let schedule = Schedule::partition(
            vec![
                appearance("later", now + Duration::days(3)),
                appearance("earlier", now - Duration::hours(1)),
                appearance("soon", now + Duration::minutes(5)),
            ],
            now,
        );

        assert_eq!(schedule.past_shows_count, 1);
        assert_eq!(schedule.upcoming_shows_count, 2);
        assert_eq!(schedule.past_shows[0].artist_name, "earlier");
        let upcoming: Vec<_> = schedule
            .upcoming_shows
            .iter()
            .map(|s| s.artist_name.as_str())
            .collect();
        assert_eq!(upcoming, vec!["soon", "later"]);
    }

    #[test]
    fn test_show_starting_exactly_now_is_upcoming() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 20, 0, 0).unwrap();
        let schedule = Schedule::partition(vec![appearance("boundary", now)], now);

        assert!(schedule.past_shows.is_empty());
        assert_eq!(schedule.upcoming_shows_count, 1);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule: Schedule<ArtistAppearance> = Schedule::partition(Vec::new(), Utc::now());
        assert_eq!(schedule.past_shows_count, 0);
        assert_eq!(schedule.upcoming_shows_count, 0);
    }
}
