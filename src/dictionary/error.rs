// Errors surfaced to API callers and the CLI.
//
// Each variant maps onto one HTTP status in web::error. Storage failures
// ride along as Internal and are never shown verbatim to clients.

use thiserror::Error;

use crate::extract::ExtractError;

#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Missing or malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Bad credentials or no session (401)
    #[error("{0}")]
    Unauthenticated(String),

    /// Authenticated but not allowed (403)
    #[error("{0}")]
    Forbidden(String),

    /// The referenced row doesn't exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Would violate a uniqueness rule (409)
    #[error("{0}")]
    Conflict(String),

    /// An optional integration isn't configured (503)
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DictionaryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<ExtractError> for DictionaryError {
    fn from(err: ExtractError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type DictResult<T> = std::result::Result<T, DictionaryError>;
