use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Response};
use tera::Context;
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Database error")]
    DatabaseError(#[from] StoreError),

    #[error("Template error")]
    TemplateError(#[from] tera::Error),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::TemplateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::TemplateError(_) => "TEMPLATE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, code = self.code(), "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, code = self.code(), "Database error");
            }
            AppError::TemplateError(e) => {
                error!(error = ?e, code = self.code(), "Template error");
            }
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::DatabaseError(StoreError::NotFound) => "Record not found".to_string(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            AppError::TemplateError(_) | AppError::InternalServerError(_) => {
                "Something went wrong".to_string()
            }
        }
    }
}

/// Marks a response produced by [`AppError`] so [`render_error_pages`] can
/// swap in the matching HTML template.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let message = self.public_message();

        let mut response = (status, message.clone()).into_response();
        response
            .extensions_mut()
            .insert(ErrorPage { status, message });
        response
    }
}

fn error_template(status: StatusCode) -> Option<&'static str> {
    if status == StatusCode::NOT_FOUND {
        Some("errors/404.html")
    } else if status.is_server_error() {
        Some("errors/500.html")
    } else {
        None
    }
}

/// Renders `errors/404.html` and `errors/500.html` for tagged error responses.
pub async fn render_error_pages(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let request_path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(page) = response.extensions().get::<ErrorPage>().cloned() else {
        return response;
    };
    let Some(template) = error_template(page.status) else {
        return response;
    };

    let mut context = Context::new();
    context.insert("status_code", &page.status.as_u16());
    context.insert("message", &page.message);
    context.insert("request_path", &request_path);
    context.insert("messages", &Vec::<String>::new());

    match state.views.render(template, &context) {
        Ok(body) => (page.status, Html(body)).into_response(),
        Err(e) => {
            error!(error = ?e, template, "Failed to render error page");
            response
        }
    }
}
