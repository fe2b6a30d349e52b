// Administrator routes.
//
// GET /api/admin/users                  every account
// PUT /api/admin/users/{id}/role        { role }
// PUT /api/admin/words/{id}/challenge   { isChallengeWord }

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::db::models::Role;
use crate::dictionary::{moderation, users, CurrentUser, DictResult, DictionaryError};
use crate::web::AppState;

#[derive(Deserialize)]
pub struct RoleRequest {
    #[serde(default)]
    role: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    is_challenge_word: bool,
}

pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> DictResult<impl IntoResponse> {
    let all = users::list_users(&state.db, &user).await?;
    Ok(Json(serde_json::json!({ "success": true, "users": all })))
}

pub async fn set_role(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<RoleRequest>,
) -> DictResult<impl IntoResponse> {
    let role = Role::parse(&body.role)
        .ok_or_else(|| DictionaryError::validation(format!("Unknown role: {}", body.role)))?;
    let updated = users::set_role(&state.db, &user, id, role).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": updated })))
}

pub async fn set_challenge_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<ChallengeRequest>,
) -> DictResult<impl IntoResponse> {
    let word = moderation::set_challenge_word(&state.db, &user, id, body.is_challenge_word).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": word })))
}
