//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::Json;
use civicsense_core::ValidationError;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// JSON body whose rejections render as [`ApiError::Validation`]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

        Ok(Self(value))
    }
}
