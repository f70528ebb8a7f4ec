use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::forms::{FormFields, ShowForm};
use crate::handlers::form_page;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::flash::Flashes;
use crate::utils::response::Page;

const SHOW_NOT_LISTED: &str = "An error occurred. Show could not be listed.";

pub async fn list(State(state): State<AppState>, flashes: Flashes) -> Result<Response, AppError> {
    let shows = state.store.list_shows().await?;

    Page::new("pages/shows.html")
        .with("shows", &shows)
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create_form(
    State(state): State<AppState>,
    flashes: Flashes,
) -> Result<Response, AppError> {
    form_page("forms/new_show.html", &ShowForm::starting_at(Utc::now()))
        .flashes(flashes)
        .render(&state.views)
}

pub async fn create(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Response, AppError> {
    let form = ShowForm::parse(&fields);

    let input = match form.validated() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "Rejected show submission");
            return form_page("forms/new_show.html", &form)
                .flash(SHOW_NOT_LISTED)
                .render(&state.views);
        }
    };

    match state.store.create_show(input).await {
        Ok(show) => {
            info!(
                show_id = show.id,
                venue_id = show.venue_id,
                artist_id = show.artist_id,
                "Show listed"
            );
            Page::new("pages/home.html")
                .flash("Show was successfully listed!")
                .render(&state.views)
        }
        Err(e) => {
            error!(error = ?e, "Failed to list show, transaction rolled back");
            form_page("forms/new_show.html", &form)
                .flash(SHOW_NOT_LISTED)
                .render(&state.views)
        }
    }
}
