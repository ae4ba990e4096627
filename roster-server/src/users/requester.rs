//! Caller-asserted requester role.
//!
//! The role arrives in the `X-User-Type` header and is trusted as given.
//! Extraction never rejects: a missing or unrecognised header yields a
//! requester with no role, and each handler decides when to refuse it.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use roster_core::{DirectoryError, Role};

pub const REQUESTER_ROLE_HEADER: &str = "X-User-Type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// Header value as sent, for diagnostics
    pub asserted: String,
    pub role: Option<Role>,
}

impl Requester {
    pub fn from_header(value: Option<&str>) -> Self {
        let asserted = value.unwrap_or_default().to_string();
        let role = asserted.parse().ok();
        Self { asserted, role }
    }

    /// The requester's role, or [`DirectoryError::Forbidden`] if the header
    /// named no known role.
    pub fn require_role(&self) -> Result<Role, DirectoryError> {
        self.role.ok_or(DirectoryError::Forbidden)
    }
}

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(REQUESTER_ROLE_HEADER)
            .and_then(|value| value.to_str().ok());
        Ok(Self::from_header(value))
    }
}
