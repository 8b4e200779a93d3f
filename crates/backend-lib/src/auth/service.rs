use async_trait::async_trait;
use tasktrack_common::{SignInRequest, SignUpRequest};

use crate::error::AppError;

/// Orchestrates sign-up and sign-in over the credential store, password
/// hasher, and token issuer. Sign-out only clears the client-side carrier
/// and lives with the handlers.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and return a session token for them
    async fn sign_up(&self, req: SignUpRequest) -> Result<String, AppError>;

    /// Authenticate by email and password and return a fresh session token
    async fn sign_in(&self, req: SignInRequest) -> Result<String, AppError>;
}
