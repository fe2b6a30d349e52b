// VariantGenerator: anything that can propose grammatical forms of a term.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One proposed form of a dictionary term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedVariant {
    pub variant: String,
    /// conjugation, plural, feminine, diminutive, derivative, ...
    #[serde(rename = "type", default)]
    pub variant_type: String,
}

#[async_trait]
pub trait VariantGenerator: Send + Sync {
    /// Propose variants of a Hassaniya term. An empty list is a valid answer.
    async fn generate(&self, term: &str) -> Result<Vec<GeneratedVariant>>;
}
