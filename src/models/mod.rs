pub mod artist;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistDetail, ArtistInput, ArtistListing};
pub use show::{
    ArtistAppearance, Schedule, Scheduled, Show, ShowInput, ShowListing, VenueAppearance,
};
pub use venue::{group_by_area, Venue, VenueArea, VenueDetail, VenueInput, VenueListing, VenueSummary};
