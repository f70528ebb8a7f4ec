use serde::Serialize;
use validator::Validate;

use crate::forms::{
    optional, validate_genres, validate_optional_url, validate_phone, validate_state, FormError,
    FormFields,
};
use crate::models::{Artist, ArtistInput};

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ArtistForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "City must be 1 to 120 characters"))]
    pub city: String,

    #[validate(custom(function = "validate_state"))]
    pub state: String,

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

    pub seeking_venue: bool,

    #[validate(length(max = 500))]
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn parse(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            genres: fields.all("genres"),
            website: fields.text("website"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            website: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validated(self) -> Result<ArtistInput, FormError> {
        self.validate()?;

        Ok(ArtistInput {
            name: self.name,
            city: self.city,
            state: self.state,
            phone: optional(self.phone),
            image_link: optional(self.image_link),
            facebook_link: optional(self.facebook_link),
            genres: self.genres,
            website: optional(self.website),
            seeking_venue: self.seeking_venue,
            seeking_description: optional(self.seeking_description),
        })
    }
}
