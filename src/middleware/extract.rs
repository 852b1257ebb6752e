use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::CafeteriaError;

/// JSON body extractor whose rejection uses the API failure envelope instead
/// of axum's plain-text response.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CafeteriaError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(CafeteriaError::InvalidRequest(rejection.body_text())),
        }
    }
}

/// Numeric `{id}` path segment for the cafe routes.
#[derive(Debug, Clone, Copy)]
pub struct CafeId(pub i64);

impl<S> FromRequestParts<S> for CafeId
where
    S: Send + Sync,
{
    type Rejection = CafeteriaError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CafeteriaError::InvalidId(rejection.body_text()))?;
        raw.parse::<i64>()
            .map(CafeId)
            .map_err(|_| CafeteriaError::InvalidId(raw))
    }
}
