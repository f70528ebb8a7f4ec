use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use cookie::{Cookie, SameSite};

pub const FLASH_COOKIE: &str = "fyyur_flash";

/// One-shot notifications shown on the next rendered page.
///
/// Messages that must survive a redirect travel in a percent-encoded cookie
/// holding a JSON array; the page that displays them clears the cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flashes {
    messages: Vec<String>,
}

impl Flashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn extend(&mut self, other: Flashes) {
        self.messages.extend(other.messages);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Reads pending messages from a `Cookie` request header value.
    pub fn from_cookie_header(header: &str) -> Self {
        let messages = Cookie::split_parse_encoded(header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == FLASH_COOKIE)
            .and_then(|cookie| serde_json::from_str::<Vec<String>>(cookie.value()).ok())
            .unwrap_or_default();

        Self { messages }
    }

    pub fn to_set_cookie(&self) -> Result<String, serde_json::Error> {
        let value = serde_json::to_string(&self.messages)?;
        let cookie = Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();

        Ok(cookie.encoded().to_string())
    }

    pub fn removal_cookie() -> String {
        let mut cookie = Cookie::build((FLASH_COOKIE, "")).path("/").build();
        cookie.make_removal();
        cookie.to_string()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flashes
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut flashes = Flashes::new();
        for header in parts.headers.get_all(COOKIE) {
            if let Ok(header) = header.to_str() {
                flashes.extend(Flashes::from_cookie_header(header));
            }
        }
        Ok(flashes)
    }
}
