// POST /api/extract-words: run the word extractor over submitted text.
//
// Takes a `text` field from either a urlencoded or a multipart form and
// answers with { totalExtracted, newWords, existingWords }. Any other body
// counts as empty text and gets the extractor's 400.

use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Form, Json};
use serde::Deserialize;

use crate::dictionary::{analysis, DictResult};
use crate::web::AppState;

#[derive(Deserialize)]
pub struct ExtractForm {
    #[serde(default)]
    text: String,
}

pub async fn extract_words(
    State(state): State<AppState>,
    request: Request,
) -> DictResult<impl IntoResponse> {
    let text = form_text(request).await;
    let report = analysis::analyze_text(&state.db, &text).await?;
    Ok(Json(report))
}

/// The `text` field of a form body, or "" when there is none.
async fn form_text(request: Request) -> String {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("multipart/form-data") {
        let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
            return String::new();
        };
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() == Some("text") {
                return field.text().await.unwrap_or_default();
            }
        }
        String::new()
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        match Form::<ExtractForm>::from_request(request, &()).await {
            Ok(Form(form)) => form.text,
            Err(_) => String::new(),
        }
    } else {
        String::new()
    }
}
