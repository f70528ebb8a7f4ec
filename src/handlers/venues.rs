use axum::extract::{Path, State};
use axum::response::Response;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::db::StoreError;
use crate::forms::{FormFields, VenueForm};
use crate::handlers::{form_page, SearchResults};
use crate::models::{group_by_area, Schedule, VenueDetail, VenueSummary};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::flash::Flashes;
use crate::utils::response::{redirect_with_flash, Page};

fn venue_not_found(venue_id: i32) -> AppError {
    AppError::NotFound(format!("Venue {venue_id} does not exist"))
}

pub async fn list(State(state): State<AppState>, flashes: Flashes) -> Result<Response, AppError> {
    let listings = state.store.list_venues(Utc::now()).await?;

    Page::new("pages/venues.html")
        .with("areas", &group_by_area(listings))
        .flashes(flashes)
        .render(&state.views)
}

pub async fn search(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let search_term = fields.text("search_term");
    let mut page = Page::new("pages/search_venues.html").with("search_term", &search_term);

    let venues: Vec<VenueSummary> = match state.store.search_venues(&search_term, Utc::now()).await
    {
        Ok(listings) => listings.into_iter().map(VenueSummary::from).collect(),
        Err(e) => {
            error!(error = ?e, search_term = %search_term, "Venue search failed");
            page = page.flash(format!(
                "An error occurred while searching for '{search_term}'."
            ));
            Vec::new()
        }
    };

    page.with("results", &SearchResults::new(venues))
        .render(&state.views)
}

pub async fn show(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .find_venue(venue_id)
        .await?
        .ok_or_else(|| venue_not_found(venue_id))?;
    let shows = state.store.venue_shows(venue_id).await?;

    let detail = VenueDetail {
        venue,
        schedule: Schedule::partition(shows, Utc::now()),
    };

    Page::new("pages/show_venue.html")
        .with("venue", &detail)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create_form(
    State(state): State<AppState>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    form_page("forms/new_venue.html", &VenueForm::default())
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let form = VenueForm::parse(&fields);
    let name = form.name.clone();

    let input = match form.clone().validated() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Rejected venue submission");
            return form_page("forms/new_venue.html", &form)
                .flash(format!("An error occurred. Venue {name} could not be listed."))
                .render(&state.views);
        }
    };

    let message = match state.store.create_venue(input).await {
        Ok(venue) => {
            info!(venue_id = venue.id, name = %venue.name, "Venue listed");
            format!("Venue {} was successfully listed!", venue.name)
        }
        Err(e) => {
            error!(error = ?e, name = %name, "Failed to list venue, transaction rolled back");
            format!("An error occurred. Venue {name} could not be listed.")
        }
    };

    Page::new("pages/home.html")
        .flash(message)
        .render(&state.views)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .find_venue(venue_id)
        .await?
        .ok_or_else(|| venue_not_found(venue_id))?;

    form_page("forms/edit_venue.html", &VenueForm::from_venue(&venue))
        .with("venue", &venue)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn edit(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .find_venue(venue_id)
        .await?
        .ok_or_else(|| venue_not_found(venue_id))?;
    let form = VenueForm::parse(&fields);

    let input = match form.clone().validated() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, venue_id, "Rejected venue update");
            return form_page("forms/edit_venue.html", &form)
                .with("venue", &venue)
                .flash(format!("An error occurred. Venue {} could not be changed.", venue.name))
                .render(&state.views);
        }
    };

    let message = match state.store.update_venue(venue_id, input).await {
        Ok(updated) => {
            info!(venue_id, "Venue updated");
            format!("Venue {} was successfully updated!", updated.name)
        }
        Err(e) => {
            error!(error = ?e, venue_id, "Failed to update venue, transaction rolled back");
            format!("An error occurred. Venue {} could not be changed.", venue.name)
        }
    };

    Ok(redirect_with_flash(&format!("/venues/{venue_id}"), message))
}

/// Looks the venue up first so every outcome can be reported by name.
pub async fn delete(State(state): State<AppState>, Path(venue_id): Path<i32>) -> Response {
    let venue = match state.store.find_venue(venue_id).await {
        Ok(Some(venue)) => venue,
        Ok(None) => return redirect_with_flash("/", format!("Venue {venue_id} was not found")),
        Err(e) => {
            error!(error = ?e, venue_id, "Failed to load venue for deletion");
            return redirect_with_flash(
                "/",
                format!("An error occurred. Venue {venue_id} could not be deleted."),
            );
        }
    };

    let message = match state.store.delete_venue(venue_id).await {
        Ok(()) => {
            info!(venue_id, name = %venue.name, "Venue deleted");
            format!("Venue {} was deleted", venue.name)
        }
        Err(StoreError::ForeignKeyViolation(constraint)) => {
            warn!(venue_id, constraint = %constraint, "Venue still has shows, delete rejected");
            format!(
                "An error occurred. Venue {} could not be deleted while it has shows.",
                venue.name
            )
        }
        Err(e) => {
            error!(error = ?e, venue_id, "Failed to delete venue, transaction rolled back");
            format!("An error occurred. Venue {} could not be deleted.", venue.name)
        }
    };

    redirect_with_flash("/", message)
}
