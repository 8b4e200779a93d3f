// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Request input validation.
//!
//! Presence and shape checks only; credential checks live in the auth
//! service. Offending fields are reported back by name in a single message.

use regex::Regex;
use std::sync::LazyLock;
use tasktrack_common::{SignInRequest, SignUpRequest};
use thiserror::Error;

use crate::error::AppError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// One or more request fields were missing or malformed.
#[derive(Error, Debug)]
#[error("{}", missing_message(.fields))]
pub struct InvalidInput {
    fields: Vec<&'static str>,
}

fn missing_message(fields: &[&'static str]) -> String {
    format!(
        "{} {} missing",
        fields.join(", "),
        if fields.len() == 1 { "is" } else { "are" }
    )
}

impl From<InvalidInput> for AppError {
    fn from(err: InvalidInput) -> Self {
        AppError::Validation(err.to_string())
    }
}

fn finish(fields: Vec<&'static str>) -> Result<(), InvalidInput> {
    if fields.is_empty() {
        Ok(())
    } else {
        Err(InvalidInput { fields })
    }
}

fn email_ok(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Validate a sign-up body: username, password non-empty, email well-formed.
pub fn validate_sign_up(req: &SignUpRequest) -> Result<(), InvalidInput> {
    let mut fields = Vec::new();

    if req.username.trim().is_empty() {
        fields.push("username");
    }
    if !email_ok(&req.email) {
        fields.push("email");
    }
    if req.password.is_empty() {
        fields.push("password");
    }

    finish(fields)
}

/// Validate a sign-in body: email well-formed, password non-empty.
pub fn validate_sign_in(req: &SignInRequest) -> Result<(), InvalidInput> {
    let mut fields = Vec::new();

    if !email_ok(&req.email) {
        fields.push("email");
    }
    if req.password.is_empty() {
        fields.push("password");
    }

    finish(fields)
}

/// Validate a task title.
pub fn validate_task_title(title: &str) -> Result<(), InvalidInput> {
    if title.trim().is_empty() {
        return Err(InvalidInput {
            fields: vec!["title"],
        });
    }

    Ok(())
}
