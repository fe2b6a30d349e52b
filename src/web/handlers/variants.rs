// GET  /api/words/{id}/variants  stored variants
// POST /api/words/{id}/variants  generate, store and return new ones

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::dictionary::{DictResult, DictionaryError};
use crate::variants;
use crate::web::AppState;

pub async fn list_variants(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    let stored = variants::list_for_word(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "variants": stored })))
}

pub async fn generate_variants(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    let Some(generator) = state.generator.as_deref() else {
        return Err(DictionaryError::Unavailable(
            "Variant generation is not configured".to_string(),
        ));
    };

    let generated = variants::generate_for_word(&state.db, generator, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "variants": generated,
        "message": "Variants generated and stored successfully",
    })))
}
