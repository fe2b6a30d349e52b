// Auth handlers: POST /api/register, POST /api/login and POST /api/logout.
//
// Register and login both answer with a signed session cookie and the same
// token in the body, for clients that prefer a bearer header.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::db::models::User;
use crate::dictionary::{users, DictResult};
use crate::web::auth::{clear_cookie_header, create_token, set_cookie_header};
use crate::web::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn session_response(state: &AppState, status: StatusCode, user: User) -> Response {
    let token = create_token(&state.config.session_secret, user.id);
    // The server can't see TLS behind a proxy, so Secure is left off.
    let cookie = set_cookie_header(&token, false);

    (
        status,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "user": user, "token": token })),
    )
        .into_response()
}

/// POST /api/register: create a contributor account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> DictResult<Response> {
    let user = users::register(&state.db, &body.email, &body.name, &body.password).await?;
    Ok(session_response(&state, StatusCode::CREATED, user))
}

/// POST /api/login: authenticate with email and password.
///
/// On success: returns 200 with a signed session cookie.
/// On failure: returns 401.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> DictResult<Response> {
    let user = users::authenticate(&state.db, &body.email, &body.password).await?;
    Ok(session_response(&state, StatusCode::OK, user))
}

/// POST /api/logout: clear the session cookie.
pub async fn logout() -> Response {
    let cookie = clear_cookie_header();
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
        .into_response()
}
