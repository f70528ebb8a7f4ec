#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use chrono::{DateTime, Utc};

use fyyur_server::config::SecurityHeadersLayer;
use fyyur_server::db::{MemoryStore, Store};
use fyyur_server::models::{Artist, ArtistInput, Show, ShowInput, Venue, VenueInput};
use fyyur_server::routes::create_routes;
use fyyur_server::state::AppState;
use fyyur_server::utils::flash::Flashes;
use fyyur_server::views::Views;

/// Test helper: app backed by `store`, HSTS off
pub fn setup_app(store: &MemoryStore) -> Router {
    let views = Views::new().expect("templates should compile");
    let state = AppState::new(Arc::new(store.clone()), views);
    create_routes(state, SecurityHeadersLayer::new(false))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

/// The `name=value` part of the flash cookie set on `response`, if any.
pub fn flash_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with("fyyur_flash=") && !value.contains("Max-Age=0"))
        .map(|value| value.split(';').next().unwrap_or_default().to_string())
        .next()
}

pub fn flash_messages(response: &Response) -> Vec<String> {
    flash_cookie(response)
        .map(|pair| Flashes::from_cookie_header(&pair).messages().to_vec())
        .unwrap_or_default()
}

pub fn venue_form(name: &str, city: &str, state: &str, phone: &str) -> String {
    serde_urlencoded::to_string([
        ("name", name),
        ("city", city),
        ("state", state),
        ("address", "1015 Folsom Street"),
        ("phone", phone),
        ("genres", "Jazz"),
        ("genres", "Reggae"),
        ("image_link", ""),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
        ("website", "https://www.themusicalhop.com"),
        ("seeking_talent", "y"),
        ("seeking_description", "We are on the lookout for a local artist"),
    ])
    .unwrap()
}

pub fn artist_form(name: &str) -> String {
    serde_urlencoded::to_string([
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "326-123-5000"),
        ("genres", "Rock n Roll"),
        ("image_link", "https://images.example.com/guns-n-petals.jpg"),
        ("facebook_link", ""),
        ("website", ""),
        ("seeking_description", ""),
    ])
    .unwrap()
}

pub fn venue_input(name: &str, city: &str, state: &str) -> VenueInput {
    VenueInput {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: None,
        image_link: None,
        facebook_link: None,
        genres: vec!["Jazz".to_string()],
        website: None,
        seeking_talent: false,
        seeking_description: None,
    }
}

pub fn artist_input(name: &str) -> ArtistInput {
    ArtistInput {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        image_link: None,
        facebook_link: None,
        genres: vec!["Rock n Roll".to_string()],
        website: None,
        seeking_venue: false,
        seeking_description: None,
    }
}

pub async fn seed_venue(store: &MemoryStore, name: &str, city: &str, state: &str) -> Venue {
    store
        .create_venue(venue_input(name, city, state))
        .await
        .expect("Should seed venue")
}

pub async fn seed_artist(store: &MemoryStore, name: &str) -> Artist {
    store
        .create_artist(artist_input(name))
        .await
        .expect("Should seed artist")
}

pub async fn seed_show(
    store: &MemoryStore,
    venue: &Venue,
    artist: &Artist,
    start_time: DateTime<Utc>,
) -> Show {
    store
        .create_show(ShowInput {
            venue_id: venue.id,
            artist_id: artist.id,
            start_time,
        })
        .await
        .expect("Should seed show")
}
