//! JSON request bodies decoded regardless of the declared content type.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use super::errors::{AppError, INVALID_PAYLOAD};

/// Request body parsed as JSON
///
/// Unlike `axum::Json`, a missing or non-JSON `Content-Type` header is not
/// an error. Only an unreadable or undecodable body is rejected, with 400
/// `invalid request payload`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPayload<T>(pub T);

impl<T, S> FromRequest<S> for JsonPayload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            warn!(error = %rejection.body_text(), "BadRequest: unreadable payload");
            AppError::bad_request(INVALID_PAYLOAD)
        })?;

        serde_json::from_slice(&bytes).map(JsonPayload).map_err(|err| {
            warn!(error = %err, "BadRequest: undecodable payload");
            AppError::bad_request(INVALID_PAYLOAD)
        })
    }
}
