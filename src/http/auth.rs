//! Request identity.
//!
//! Authentication itself happens upstream; this layer trusts the `x-user-id` header and turns
//! it into an explicit [`UserId`] that handlers pass down to the cart.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::model::UserId;

/// Header carrying the authenticated user's id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the optional current user.
///
/// Never rejects: a missing, blank or non-UTF-8 header yields `CurrentUser(None)` and the cart
/// decides what an anonymous caller may do.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {u}!"),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser(pub Option<UserId>);

impl CurrentUser {
    pub fn user(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(UserId::new);

        Ok(Self(user))
    }
}
