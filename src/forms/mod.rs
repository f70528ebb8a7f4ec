//! One validated input schema per entity, shared by the create and edit pages.
//!
//! Forms keep every field as submitted text so a rejected submission can be
//! rendered back into the page; `validated` turns an accepted form into the
//! store's input type.

use thiserror::Error;
use url::Url;
use validator::{ValidationError, ValidationErrors};

pub mod artist;
pub mod choices;
pub mod fields;
pub mod show;
pub mod venue;

pub use artist::ArtistForm;
pub use fields::FormFields;
pub use show::ShowForm;
pub use venue::VenueForm;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Field `{0}` could not be parsed")]
    Unparseable(&'static str),
}

/// Blank text becomes `None` so it is stored as NULL.
pub(crate) fn optional(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

pub(crate) fn validate_state(value: &str) -> Result<(), ValidationError> {
    if choices::is_state(value) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_state"))
    }
}

pub(crate) fn validate_genres(genres: &[String]) -> Result<(), ValidationError> {
    if genres.iter().all(|genre| choices::is_genre(genre)) {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_genre"))
    }
}

/// Blank, or an absolute `http`/`https` URL with a host. Links are rendered
/// into `href` and `src`, so no other scheme is accepted.
pub(crate) fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(ValidationError::new("url")),
    }
}

pub(crate) fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '.' | '(' | ')');
    if value.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}
