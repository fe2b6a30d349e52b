// DictionaryError → HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use super::api_error;
use crate::dictionary::DictionaryError;

impl IntoResponse for DictionaryError {
    fn into_response(self) -> Response {
        let status = match &self {
            DictionaryError::Validation(_) => StatusCode::BAD_REQUEST,
            DictionaryError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            DictionaryError::Forbidden(_) => StatusCode::FORBIDDEN,
            DictionaryError::NotFound(_) => StatusCode::NOT_FOUND,
            DictionaryError::Conflict(_) => StatusCode::CONFLICT,
            DictionaryError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            DictionaryError::Internal(e) => {
                error!(error = %format!("{e:#}"), "Request failed");
                return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };
        api_error(status, &self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (DictionaryError::validation("x"), StatusCode::BAD_REQUEST),
            (
                DictionaryError::Unauthenticated("x".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (DictionaryError::forbidden("x"), StatusCode::FORBIDDEN),
            (DictionaryError::not_found("x"), StatusCode::NOT_FOUND),
            (DictionaryError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                DictionaryError::Internal(anyhow::anyhow!("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
