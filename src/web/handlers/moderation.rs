// PUT /api/words/{id}/approve and PUT /api/words/{id}/reject.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::dictionary::{moderation, CurrentUser, DictResult};
use crate::web::AppState;

pub async fn approve_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    let word = moderation::approve_word(&state.db, &user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": word })))
}

pub async fn reject_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    let word = moderation::reject_word(&state.db, &user, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": word })))
}
