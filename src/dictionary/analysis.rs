// Run the word extractor against the current dictionary.

use std::sync::Arc;

use tracing::info;

use super::DictResult;
use crate::db::Database;
use crate::extract::{analyze, ExtractError, ExtractionReport, KnownTerms};

/// Extract candidate terms from `text`, marking the ones already present
/// in the dictionary under any status.
pub async fn analyze_text(db: &Arc<dyn Database>, text: &str) -> DictResult<ExtractionReport> {
    // Fail before touching the database.
    if text.is_empty() {
        return Err(ExtractError::EmptyText.into());
    }

    let known: KnownTerms = db.all_terms().await?.into_iter().collect();
    let report = analyze(text, &known)?;
    info!(
        known = known.len(),
        extracted = report.total_extracted,
        new = report.new_words.len(),
        "Analyzed text"
    );
    Ok(report)
}
