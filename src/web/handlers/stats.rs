// GET /api/public/stats: dashboard numbers for visitors.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::dictionary::{stats, DictResult};
use crate::web::AppState;

pub async fn public_stats(State(state): State<AppState>) -> DictResult<impl IntoResponse> {
    let stats = stats::public_stats(&state.db, state.config.challenge_target).await?;
    Ok(Json(stats))
}
