// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session carrier: the cookie that moves the token between client and
//! server. Extraction reads only the incoming request's `Cookie` header,
//! never response-side state.
use std::time::Duration;

use axum::http::{header::COOKIE, HeaderMap};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "fortune";

/// Build the `Set-Cookie` value that attaches `token` to the client for
/// `ttl`. `HttpOnly` keeps it out of reach of page scripts.
pub fn issue_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        ttl.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Locate the carried token in the incoming request, or indicate absence.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, token) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE).then(|| token.to_string())
        })
}
