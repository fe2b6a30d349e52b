// Auth middleware: stateless HMAC-SHA256 session tokens.
//
// Session token format: {user_id}.{timestamp_secs}.{nonce_hex}.{hmac_hex}
//
// The HMAC covers "{user_id}.{timestamp_secs}.{nonce_hex}" signed with
// QAMUS_SESSION_SECRET. Tokens are valid for SESSION_TTL_SECS (24 hours).
//
// Login flow:
//   POST /api/login { email, password } → check the stored password hash
//     success: set qamus_session cookie and return the token in the body
//     failure: 401
//
// Auth check (this middleware):
//   take the token from the qamus_session cookie or an
//   `Authorization: Bearer` header → verify HMAC and age → load the user
//   → insert CurrentUser into request extensions

use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use super::{api_error, AppState};
use crate::dictionary::password::constant_time_eq;
use crate::dictionary::users;

type HmacSha256 = Hmac<Sha256>;

/// Session cookie name.
pub const COOKIE_NAME: &str = "qamus_session";

/// Session lifetime: 24 hours.
pub const SESSION_TTL_SECS: u64 = 86_400;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Build a new session token for `user_id` signed with `secret`.
pub fn create_token(secret: &str, user_id: i64) -> String {
    create_token_at(secret, user_id, now_secs())
}

fn create_token_at(secret: &str, user_id: i64, timestamp: u64) -> String {
    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    let payload = format!("{user_id}.{timestamp}.{nonce}");
    let sig = hmac_sign(secret, &payload);

    format!("{payload}.{sig}")
}

/// Verify a session token. Returns the user ID if the HMAC is valid and the
/// token is not older than `SESSION_TTL_SECS`.
pub fn verify_token(secret: &str, token: &str) -> Option<i64> {
    let mut parts = token.splitn(4, '.');
    let (user_str, timestamp_str, nonce, provided_sig) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);

    let payload = format!("{user_str}.{timestamp_str}.{nonce}");
    let expected_sig = hmac_sign(secret, &payload);
    if expected_sig.is_empty() || !constant_time_eq(provided_sig, &expected_sig) {
        return None;
    }

    let timestamp = timestamp_str.parse::<u64>().ok()?;
    if now_secs().saturating_sub(timestamp) >= SESSION_TTL_SECS {
        return None;
    }
    user_str.parse::<i64>().ok()
}

/// Axum middleware: reject requests without a valid session with 401.
///
/// On success the acting `CurrentUser` is available to handlers as
/// `Extension<CurrentUser>`.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = session_token(request.headers())
        .and_then(|token| verify_token(&state.config.session_secret, token));

    let Some(user_id) = user_id else {
        return api_error(StatusCode::UNAUTHORIZED, "Authentication required");
    };

    match users::resolve(&state.db, user_id).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Build the `Set-Cookie` header value for a new session.
pub fn set_cookie_header(token: &str, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{COOKIE_NAME}={token}; HttpOnly{secure_flag}; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    )
}

/// Build the `Set-Cookie` header value that clears the session cookie.
pub fn clear_cookie_header() -> String {
    format!("{COOKIE_NAME}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0")
}

// --- Private helpers ---

/// Empty on a key the MAC refuses, which no token can match.
fn hmac_sign(secret: &str, payload: &str) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Find the session token: bearer header first, then the cookie.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.trim());
    }

    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;
    cookie_header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name.trim() == COOKIE_NAME).then(|| value.trim())
    })
}
