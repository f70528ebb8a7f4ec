use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use tera::Context;
use tracing::warn;

use crate::utils::error::AppError;
use crate::utils::flash::Flashes;
use crate::views::Views;

#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

pub fn success<T>(data: T, message: impl Into<String>) -> impl IntoResponse
where
    T: Serialize,
{
    let body = ApiResponse {
        success: true,
        data: Some(data),
        message: Some(message.into()),
    };
    (StatusCode::OK, Json(body))
}

/// An HTML page: a template, its context, and the flash messages to show.
pub struct Page {
    template: &'static str,
    context: Context,
    status: StatusCode,
    flashes: Flashes,
    clears_cookie: bool,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Context::new(),
            status: StatusCode::OK,
            flashes: Flashes::new(),
            clears_cookie: false,
        }
    }

    pub fn with<T: Serialize + ?Sized>(mut self, key: &str, value: &T) -> Self {
        self.context.insert(key, value);
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Shows messages carried over from the previous request and clears them.
    pub fn flashes(mut self, pending: Flashes) -> Self {
        if !pending.is_empty() {
            self.clears_cookie = true;
            self.flashes.extend(pending);
        }
        self
    }

    pub fn flash(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(message);
        self
    }

    pub fn render(mut self, views: &Views) -> Result<Response, AppError> {
        self.context.insert("messages", self.flashes.messages());
        let body = views.render(self.template, &self.context)?;

        let mut response = (self.status, Html(body)).into_response();
        if self.clears_cookie {
            let removal = HeaderValue::from_str(&Flashes::removal_cookie())
                .map_err(|e| AppError::InternalServerError(e.to_string()))?;
            response.headers_mut().append(SET_COOKIE, removal);
        }
        Ok(response)
    }
}

/// `303 See Other` to `to`, carrying `message` to the next rendered page.
pub fn redirect_with_flash(to: &str, message: impl Into<String>) -> Response {
    let mut flashes = Flashes::new();
    flashes.push(message);

    let mut response = Redirect::to(to).into_response();
    match flashes
        .to_set_cookie()
        .map_err(|e| e.to_string())
        .and_then(|cookie| HeaderValue::from_str(&cookie).map_err(|e| e.to_string()))
    {
        Ok(cookie) => {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        Err(e) => warn!(error = %e, "Dropping flash message"),
    }
    response
}
