use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::http::Uri;
use serde::Serialize;

use crate::forms::choices::{GENRES, STATES};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::flash::Flashes;
use crate::utils::response::{success, Page};

pub mod artists;
pub mod shows;
pub mod venues;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "fyyur",
    };

    success(payload, "Health check successful").into_response()
}

pub async fn index(State(state): State<AppState>, flashes: Flashes) -> Result<Response, AppError> {
    Page::new("pages/home.html")
        .flashes(flashes)
        .render(&state.views)
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at '{}'", uri.path()))
}

#[derive(Serialize)]
pub(crate) struct SearchResults<T> {
    count: usize,
    data: Vec<T>,
}

impl<T> SearchResults<T> {
    pub(crate) fn new(data: Vec<T>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// A form page with the state and genre choices in its context.
pub(crate) fn form_page<F: Serialize>(template: &'static str, form: &F) -> Page {
    Page::new(template)
        .with("form", form)
        .with("states", STATES)
        .with("genres", GENRES)
}
