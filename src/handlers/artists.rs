use axum::extract::{Path, State};
use axum::response::Response;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::db::StoreError;
use crate::forms::{ArtistForm, FormFields};
use crate::handlers::{form_page, SearchResults};
use crate::models::{ArtistDetail, Schedule};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::flash::Flashes;
use crate::utils::response::{redirect_with_flash, Page};

fn artist_not_found(artist_id: i32) -> AppError {
    AppError::NotFound(format!("Artist {artist_id} does not exist"))
}

pub async fn list(State(state): State<AppState>, flashes: Flashes) -> Result<Response, AppError> {
    let artists = state.store.list_artists(Utc::now()).await?;

    Page::new("pages/artists.html")
        .with("artists", &artists)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn search(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let search_term = fields.text("search_term");
    let mut page = Page::new("pages/search_artists.html").with("search_term", &search_term);

    let artists = match state.store.search_artists(&search_term, Utc::now()).await {
        Ok(artists) => artists,
        Err(e) => {
            error!(error = ?e, search_term = %search_term, "Artist search failed");
            page = page.flash(format!(
                "An error occurred while searching for '{search_term}'."
            ));
            Vec::new()
        }
    };

    page.with("results", &SearchResults::new(artists))
        .render(&state.views)
}

pub async fn show(
    State(state): State<AppState>,
    Path(artist_id): Path<i32>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .find_artist(artist_id)
        .await?
        .ok_or_else(|| artist_not_found(artist_id))?;
    let shows = state.store.artist_shows(artist_id).await?;

    let detail = ArtistDetail {
        artist,
        schedule: Schedule::partition(shows, Utc::now()),
    };

    Page::new("pages/show_artist.html")
        .with("artist", &detail)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create_form(
    State(state): State<AppState>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    form_page("forms/new_artist.html", &ArtistForm::default())
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let form = ArtistForm::parse(&fields);
    let name = form.name.clone();

    let input = match form.clone().validated() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Rejected artist submission");
            return form_page("forms/new_artist.html", &form)
                .flash(format!("An error occurred. Artist {name} could not be listed."))
                .render(&state.views);
        }
    };

    let message = match state.store.create_artist(input).await {
        Ok(artist) => {
            info!(artist_id = artist.id, name = %artist.name, "Artist listed");
            format!("Artist {} was successfully listed!", artist.name)
        }
        Err(e) => {
            error!(error = ?e, name = %name, "Failed to list artist, transaction rolled back");
            format!("An error occurred. Artist {name} could not be listed.")
        }
    };

    Page::new("pages/home.html")
        .flash(message)
        .render(&state.views)
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(artist_id): Path<i32>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .find_artist(artist_id)
        .await?
        .ok_or_else(|| artist_not_found(artist_id))?;

    form_page("forms/edit_artist.html", &ArtistForm::from_artist(&artist))
        .with("artist", &artist)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn edit(
    State(state): State<AppState>,
    Path(artist_id): Path<i32>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .find_artist(artist_id)
        .await?
        .ok_or_else(|| artist_not_found(artist_id))?;
    let form = ArtistForm::parse(&fields);

    let input = match form.clone().validated() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, artist_id, "Rejected artist update");
            return form_page("forms/edit_artist.html", &form)
                .with("artist", &artist)
                .flash(format!("An error occurred. Artist {} could not be changed.", artist.name))
                .render(&state.views);
        }
    };

    let message = match state.store.update_artist(artist_id, input).await {
        Ok(updated) => {
            info!(artist_id, "Artist updated");
            format!("Artist {} was successfully updated!", updated.name)
        }
        Err(e) => {
            error!(error = ?e, artist_id, "Failed to update artist, transaction rolled back");
            format!("An error occurred. Artist {} could not be changed.", artist.name)
        }
    };

    Ok(redirect_with_flash(&format!("/artists/{artist_id}"), message))
}

pub async fn delete(State(state): State<AppState>, Path(artist_id): Path<i32>) -> Response {
    let artist = match state.store.find_artist(artist_id).await {
        Ok(Some(artist)) => artist,
        Ok(None) => return redirect_with_flash("/", format!("Artist {artist_id} was not found")),
        Err(e) => {
            error!(error = ?e, artist_id, "Failed to load artist for deletion");
            return redirect_with_flash(
                "/",
                format!("An error occurred. Artist {artist_id} could not be deleted."),
            );
        }
    };

    let message = match state.store.delete_artist(artist_id).await {
        Ok(()) => {
            info!(artist_id, name = %artist.name, "Artist deleted");
            format!("Artist {} was deleted", artist.name)
        }
        Err(StoreError::ForeignKeyViolation(constraint)) => {
            warn!(artist_id, constraint = %constraint, "Artist still has shows, delete rejected");
            format!(
                "An error occurred. Artist {} could not be deleted while it has shows.",
                artist.name
            )
        }
        Err(e) => {
            error!(error = ?e, artist_id, "Failed to delete artist, transaction rolled back");
            format!("An error occurred. Artist {} could not be deleted.", artist.name)
        }
    };

    redirect_with_flash("/", message)
}
