use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tasktrack_common::{SignInRequest, SignUpRequest};

use crate::auth::password;
use crate::auth::token::Tokens;
use crate::auth::AuthService;
use crate::error::AppError;
use crate::metrics as keys;
use crate::storage::{NewUser, Storage};

pub struct DefaultAuth<S> {
    storage: S,
    tokens: Arc<Tokens>,
}

impl<S> DefaultAuth<S> {
    pub fn new(storage: S, tokens: Arc<Tokens>) -> Self {
        Self { storage, tokens }
    }
}

#[async_trait]
impl<S: Storage> AuthService for DefaultAuth<S> {
    async fn sign_up(&self, req: SignUpRequest) -> Result<String, AppError> {
        let SignUpRequest {
            username,
            email,
            mut password,
        } = req;

        // Fast-path duplicate check; the store's locked insert below is the
        // authoritative guard against a concurrent duplicate.
        if self
            .storage
            .find_user_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict);
        }

        let password_hash = password::hash_password_secure(&mut password)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;

        let user = self
            .storage
            .insert_user(NewUser {
                username,
                email,
                password_hash,
            })
            .await?;

        counter!(keys::AUTH_SIGN_UP).increment(1);
        tracing::info!(user = %user.id, "user registered");

        self.tokens.issue(user.id)
    }

    async fn sign_in(&self, req: SignInRequest) -> Result<String, AppError> {
        let user = match self.storage.find_user_by_email(&req.email).await? {
            Some(user) => user,
            None => {
                // same client-facing outcome as a bad password
                tracing::debug!("sign-in rejected: unknown email");
                counter!(keys::AUTH_SIGN_IN_REJECTED).increment(1);
                return Err(AppError::InvalidCredentials);
            },
        };

        if !password::verify_password(&user.password_hash, &req.password) {
            tracing::debug!(user = %user.id, "sign-in rejected: password mismatch");
            counter!(keys::AUTH_SIGN_IN_REJECTED).increment(1);
            return Err(AppError::InvalidCredentials);
        }

        counter!(keys::AUTH_SIGN_IN).increment(1);
        tracing::info!(user = %user.id, "user signed in");

        self.tokens.issue(user.id)
    }
}
