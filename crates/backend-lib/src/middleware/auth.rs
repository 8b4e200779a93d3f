//! Authorization gate for protected routes.
//!
//! Converts the carried session token into a trusted identity or rejects
//! the request before any resource handler or store access.
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use metrics::counter;
use uuid::Uuid;

use crate::auth::session;
use crate::auth::token::TokenError;
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::Storage;
use crate::AppState;

/// Identity resolved from a verified session token, valid for one request.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Uuid);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// Authorization gate middleware. Pure single-shot computation: no store
/// access, no retries.
pub async fn require_auth<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = session::extract_token(request.headers()) else {
        tracing::debug!("request rejected: no session cookie");
        counter!(keys::GATE_REJECTED).increment(1);
        return Err(AppError::Unauthorized);
    };

    match state.tokens.verify(&token) {
        Ok(user) => {
            request.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(request).await)
        },
        Err(reason) => {
            // expired vs. malformed is logged but not revealed to the client
            match reason {
                TokenError::Expired => tracing::debug!("request rejected: token expired"),
                TokenError::Invalid => tracing::debug!("request rejected: token invalid"),
            }
            counter!(keys::GATE_REJECTED).increment(1);
            Err(AppError::Unauthorized)
        },
    }
}
