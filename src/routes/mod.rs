use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::SecurityHeadersLayer;
use crate::handlers::{artists, health_check, index, not_found, shows, venues};
use crate::state::AppState;
use crate::utils::error::render_error_pages;

pub fn create_routes(state: AppState, security_headers: SecurityHeadersLayer) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create),
        )
        .route(
            "/venues/:venue_id",
            get(venues::show).delete(venues::delete),
        )
        .route("/venues/:venue_id/delete", post(venues::delete))
        .route(
            "/venues/:venue_id/edit",
            get(venues::edit_form).post(venues::edit),
        )
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create),
        )
        .route(
            "/artists/:artist_id",
            get(artists::show).delete(artists::delete),
        )
        .route("/artists/:artist_id/delete", post(artists::delete))
        .route(
            "/artists/:artist_id/edit",
            get(artists::edit_form).post(artists::edit),
        )
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_error_pages,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(security_headers)
        .with_state(state)
}
