use serde::Serialize;
use validator::Validate;

use crate::forms::{
    optional, validate_genres, validate_optional_url, validate_phone, validate_state, FormError,
    FormFields,
};
use crate::models::{Venue, VenueInput};

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct VenueForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "City must be 1 to 120 characters"))]
    pub city: String,

    #[validate(custom(function = "validate_state"))]
    pub state: String,

    #[validate(length(min = 1, max = 120, message = "Address must be 1 to 120 characters"))]
    pub address: String,

    #[validate(length(max = 120), custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(max = 500), custom(function = "validate_optional_url"))]
    pub image_link: String,

    #[validate(length(max = 120), custom(function = "validate_optional_url"))]
    pub facebook_link: String,

    #[validate(length(min = 1, message = "Pick at least one genre"))]
    #[validate(custom(function = "validate_genres"))]
    pub genres: Vec<String>,

    #[validate(length(max = 500), custom(function = "validate_optional_url"))]
    pub website: String,

    pub seeking_talent: bool,

    #[validate(length(max = 500))]
    pub seeking_description: String,
}

impl VenueForm {
    pub fn parse(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            genres: fields.all("genres"),
            website: fields.text("website"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            website: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validated(self) -> Result<VenueInput, FormError> {
        self.validate()?;

        Ok(VenueInput {
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            genres: self.genres,
            website: optional(self.website),
            seeking_talent: self.seeking_talent,
            seeking_description: optional(self.seeking_description),
        })
    }
}
