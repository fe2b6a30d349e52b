// GET /api/profile: the signed-in user with their points and badges.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};

use crate::dictionary::{users, CurrentUser, DictResult};
use crate::web::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> DictResult<impl IntoResponse> {
    Ok(Json(users::profile(&state.db, &user).await?))
}
