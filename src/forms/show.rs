use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::forms::{FormError, FormFields};
use crate::models::ShowInput;

/// Layout used to prefill the start time field.
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_FORMATS: &[&str] = &[
    START_TIME_FORMAT,
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Naive times are taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

fn parse_id(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().filter(|id| *id > 0)
}

fn validate_id(value: &str) -> Result<(), ValidationError> {
    parse_id(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("id"))
}

fn validate_start_time(value: &str) -> Result<(), ValidationError> {
    parse_start_time(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::new("start_time"))
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct ShowForm {
    #[validate(custom(function = "validate_id"))]
    pub artist_id: String,

    #[validate(custom(function = "validate_id"))]
    pub venue_id: String,

    #[validate(custom(function = "validate_start_time"))]
    pub start_time: String,
}

impl ShowForm {
    /// An empty form whose start time defaults to `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn parse(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    pub fn validated(&self) -> Result<ShowInput, FormError> {
        self.validate()?;

        Ok(ShowInput {
            venue_id: parse_id(&self.venue_id).ok_or(FormError::Unparseable("venue_id"))?,
            artist_id: parse_id(&self.artist_id).ok_or(FormError::Unparseable("artist_id"))?,
            start_time: parse_start_time(&self.start_time)
                .ok_or(FormError::Unparseable("start_time"))?,
        })
    }
}
