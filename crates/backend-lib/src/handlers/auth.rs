// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Sign-up, sign-in and sign-out handlers.
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse},
    Json,
};
use tasktrack_common::{MessageResponse, SignInRequest, SignUpRequest};

use crate::auth::session;
use crate::error::AppError;
use crate::storage::Storage;
use crate::validation;
use crate::AppState;

/// `POST /signUp`
///
/// Registers a user, attaches a session cookie, and returns 201. The
/// response body never carries password material.
pub async fn sign_up<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SignUpRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_sign_up(&req)?;

    let token = state.auth.sign_up(req).await?;
    let cookie = session::issue_cookie(&token, state.tokens.ttl(), state.settings.secure_cookies);

    Ok((
        StatusCode::CREATED,
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// `POST /signIn`
pub async fn sign_in<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_sign_in(&req)?;

    let token = state.auth.sign_in(req).await?;
    let cookie = session::issue_cookie(&token, state.tokens.ttl(), state.settings.secure_cookies);

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(MessageResponse::new("Logged in successfully")),
    ))
}

/// `POST /signOut`
///
/// Clears the client-side carrier. Idempotent: succeeds with or without an
/// active session. Previously issued tokens stay valid until they expire;
/// there is no server-side revocation list.
pub async fn sign_out() -> impl IntoResponse {
    (
        AppendHeaders([(SET_COOKIE, session::clear_cookie())]),
        Json(MessageResponse::new("User signed out successfully")),
    )
}
