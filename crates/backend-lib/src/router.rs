// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router assembly.
use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use tasktrack_common::MessageResponse;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{auth, tasks};
use crate::middleware::require_auth;
use crate::storage::Storage;
use crate::AppState;

/// Create the application router. Task routes sit behind the authorization
/// gate; the auth routes are public.
pub fn create_router<S: Storage + Clone + Send + Sync + 'static>(
    state: Arc<AppState<S>>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/get-user", get(tasks::get_user))
        .route("/get-tasks", get(tasks::get_tasks))
        .route("/add-task", post(tasks::add_task))
        .route("/edit-task/{id}", put(tasks::edit_task))
        .route("/delete-task/{id}", delete(tasks::delete_task))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/signUp", post(auth::sign_up))
        .route("/signIn", post(auth::sign_in))
        .route("/signOut", post(auth::sign_out))
        .merge(protected)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not Found")))
}
