use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::show::{ArtistAppearance, Schedule};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Column values for inserting or overwriting a venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    pub fn into_venue(self, id: i32) -> Venue {
        Venue {
            id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            genres: self.genres,
            website: self.website,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
        }
    }
}

/// A venue as it appears in listings and search results.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VenueListing {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<VenueListing> for VenueSummary {
    fn from(listing: VenueListing) -> Self {
        Self {
            id: listing.id,
            name: listing.name,
            num_upcoming_shows: listing.num_upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// Groups listings into areas in one pass.
///
/// Listings must already be ordered by city then state; a new area starts
/// whenever the (city, state) pair changes.
pub fn group_by_area(listings: impl IntoIterator<Item = VenueListing>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for listing in listings {
        match areas.last_mut() {
            Some(area) if area.city == listing.city && area.state == listing.state => {
                area.venues.push(listing.into());
            }
            _ => areas.push(VenueArea {
                city: listing.city.clone(),
                state: listing.state.clone(),
                venues: vec![listing.into()],
            }),
        }
    }

    areas
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub schedule: Schedule<ArtistAppearance>,
}
