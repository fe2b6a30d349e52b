// Word routes.
//
// GET    /api/words?status=   all entries, optionally filtered
// POST   /api/words           submit an entry
// GET    /api/words/mine      the caller's entries and standing
// GET    /api/words/search?q= public term search
// GET    /api/words/{id}      one entry
// PUT    /api/words/{id}      edit (creator only)
// DELETE /api/words/{id}      delete (creator only)
// POST   /api/save-word       submit a term picked from the text analyzer

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Deserialize;

use crate::db::models::WordStatus;
use crate::dictionary::words::{self, EntryInput};
use crate::dictionary::{CurrentUser, DictResult, DictionaryError};
use crate::web::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    status: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Body of POST /api/save-word. Saved words carry no grammar metadata.
#[derive(Deserialize)]
pub struct SaveWordRequest {
    #[serde(default)]
    term: String,
    #[serde(default)]
    definition: String,
    comment: Option<String>,
}

pub async fn list_words(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> DictResult<impl IntoResponse> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(WordStatus::parse(raw).ok_or_else(|| {
            DictionaryError::validation(format!("Unknown status: {raw}"))
        })?),
    };

    let words = words::list_words(&state.db, status).await?;
    Ok(Json(serde_json::json!({ "success": true, "words": words })))
}

pub async fn create_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<EntryInput>,
) -> DictResult<impl IntoResponse> {
    let word = words::submit_word(&state.db, &user, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": word })),
    ))
}

pub async fn save_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<SaveWordRequest>,
) -> DictResult<impl IntoResponse> {
    let input = EntryInput {
        comment: body.comment,
        ..EntryInput::new(body.term, body.definition)
    };
    let word = words::submit_word(&state.db, &user, input).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "wordId": word.id,
        "message": "Word saved successfully",
    })))
}

pub async fn my_words(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> DictResult<impl IntoResponse> {
    Ok(Json(words::my_words(&state.db, &user).await?))
}

pub async fn search_words(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> DictResult<impl IntoResponse> {
    let words = words::search_words(&state.db, &params.q).await?;
    Ok(Json(serde_json::json!({ "success": true, "words": words })))
}

pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    let word = words::get_word(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": word })))
}

pub async fn update_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(input): Json<EntryInput>,
) -> DictResult<impl IntoResponse> {
    let word = words::update_word(&state.db, &user, id, input).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": word })))
}

pub async fn delete_word(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> DictResult<impl IntoResponse> {
    words::delete_word(&state.db, &user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Word deleted",
    })))
}
