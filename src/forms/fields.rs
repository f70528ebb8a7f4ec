use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};

use crate::utils::error::AppError;

/// A decoded `application/x-www-form-urlencoded` body.
///
/// Unlike a struct-backed `Form`, repeated keys are preserved, which is how
/// browsers submit multi-selects such as `genres`.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn from_bytes(body: &[u8]) -> Result<Self, serde_urlencoded::de::Error> {
        let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)?;
        Ok(Self { pairs })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value for `name`, trimmed; empty when the field is missing.
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(str::trim).unwrap_or_default().to_string()
    }

    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// Checkbox semantics: an unchecked box is simply absent from the body.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

        FormFields::from_bytes(&body).map_err(|e| AppError::ValidationError(e.to_string()))
    }
}
