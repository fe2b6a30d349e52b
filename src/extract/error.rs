use thiserror::Error;

/// The extractor's only failure: the caller gave it nothing to read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Text content is required")]
    EmptyText,
}
