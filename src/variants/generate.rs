// Generate and store variants for a dictionary entry.

use std::sync::Arc;

use tracing::{info, warn};

use super::traits::{GeneratedVariant, VariantGenerator};
use crate::db::models::WordVariant;
use crate::db::Database;
use crate::dictionary::{DictResult, DictionaryError};

/// Ask the generator for variants of a word's term and save every one.
///
/// Returns the variants as generated. A failure to store one variant is
/// logged and the rest are still saved.
pub async fn generate_for_word(
    db: &Arc<dyn Database>,
    generator: &dyn VariantGenerator,
    word_id: i64,
) -> DictResult<Vec<GeneratedVariant>> {
    let word = db
        .get_word(word_id)
        .await?
        .ok_or_else(|| DictionaryError::not_found("Word not found"))?;

    let variants = generator.generate(&word.term).await?;

    let mut stored = 0usize;
    for v in &variants {
        match db.insert_variant(word_id, &v.variant_type, &v.variant).await {
            Ok(_) => stored += 1,
            Err(e) => warn!(error = %e, word_id, variant = %v.variant, "Failed to store variant"),
        }
    }
    info!(word_id, term = %word.term, generated = variants.len(), stored, "Generated variants");

    Ok(variants)
}

/// Variants already stored for a word, oldest first.
pub async fn list_for_word(db: &Arc<dyn Database>, word_id: i64) -> DictResult<Vec<WordVariant>> {
    if db.get_word(word_id).await?.is_none() {
        return Err(DictionaryError::not_found("Word not found"));
    }
    Ok(db.list_variants(word_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    use crate::dictionary::words::{submit_word, EntryInput};
    use crate::dictionary::{users, CurrentUser};

    struct FixedGenerator;

    #[async_trait]
    impl VariantGenerator for FixedGenerator {
        async fn generate(&self, term: &str) -> Result<Vec<GeneratedVariant>> {
            Ok(vec![
                GeneratedVariant {
                    variant: format!("{term}at"),
                    variant_type: "feminine".to_string(),
                },
                GeneratedVariant {
                    variant: format!("{term}in"),
                    variant_type: "plural".to_string(),
                },
            ])
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl VariantGenerator for FailingGenerator {
        async fn generate(&self, _term: &str) -> Result<Vec<GeneratedVariant>> {
            anyhow::bail!("Failed to parse AI response")
        }
    }

    #[tokio::test]
    async fn test_generate_stores_variants() {
        let db = crate::db::in_memory().unwrap();
        let user = users::register(&db, "v@qamus.mr", "V", "password").await.unwrap();
        let word = submit_word(&db, &CurrentUser::from(&user), EntryInput::new("kbir", "big"))
            .await
            .unwrap();

        let generated = generate_for_word(&db, &FixedGenerator, word.id).await.unwrap();
        assert_eq!(generated.len(), 2);

        let stored = list_for_word(&db, word.id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].variant, "kbirat");
        assert_eq!(stored[0].variant_type, "feminine");
    }

    #[tokio::test]
    async fn test_missing_word_and_generator_failure() {
        let db = crate::db::in_memory().unwrap();
        let missing = generate_for_word(&db, &FixedGenerator, 99).await;
        assert!(matches!(missing, Err(DictionaryError::NotFound(_))));
        assert!(matches!(
            list_for_word(&db, 99).await,
            Err(DictionaryError::NotFound(_))
        ));

        let user = users::register(&db, "v@qamus.mr", "V", "password").await.unwrap();
        let word = submit_word(&db, &CurrentUser::from(&user), EntryInput::new("sghir", "small"))
            .await
            .unwrap();
        let failed = generate_for_word(&db, &FailingGenerator, word.id).await;
        assert!(matches!(failed, Err(DictionaryError::Internal(_))));
        assert!(list_for_word(&db, word.id).await.unwrap().is_empty());
    }
}
