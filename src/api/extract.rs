//! Request extractors that report binding and validation failures through the
//! envelope as [`ErrorCode::ParamsError`](crate::error::ErrorCode::ParamsError).

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body, deserialized and validated.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "rejected JSON body");
            AppError::params("Invalid request body")
        })?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string, deserialized and validated.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "rejected query string");
                AppError::params("Invalid query parameters")
            })?;
        value.validate()?;
        Ok(Self(value))
    }
}
