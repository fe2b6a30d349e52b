// Word frequency extraction: count terms, capture first-sighting context,
// and split the result into new vs already-known terms.
//
// One pass over the token sequence. The tally and context maps live only
// for the duration of a single call.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::ExtractError;
use super::tokenizer::tokenize;

/// Number of tokens captured on each side of a term's first occurrence.
pub const CONTEXT_RADIUS: usize = 3;

/// A distinct term found in the input text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedWord {
    pub term: String,
    pub frequency: u32,
    /// Up to three tokens before and after the first occurrence, space-joined
    pub context: String,
}

/// Result of analyzing one text against the existing vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub total_extracted: usize,
    pub new_words: Vec<ExtractedWord>,
    pub existing_words: usize,
}

/// Vocabulary the dictionary already contains, lowercased for lookup.
#[derive(Debug, Clone, Default)]
pub struct KnownTerms(HashSet<String>);

impl KnownTerms {
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(&term.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|t| t.as_ref().to_lowercase()).collect())
    }
}

/// Count every distinct token and record the context of its first sighting.
///
/// Results come back in order of first occurrence.
pub fn extract_words(tokens: &[String]) -> Vec<ExtractedWord> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut words: Vec<ExtractedWord> = Vec::new();

    for (pos, token) in tokens.iter().enumerate() {
        if let Some(&i) = index.get(token.as_str()) {
            words[i].frequency += 1;
            continue;
        }

        let start = pos.saturating_sub(CONTEXT_RADIUS);
        let end = (pos + CONTEXT_RADIUS + 1).min(tokens.len());
        index.insert(token.as_str(), words.len());
        words.push(ExtractedWord {
            term: token.clone(),
            frequency: 1,
            context: tokens[start..end].join(" "),
        });
    }

    words
}

/// Extract candidate terms from `text` and keep only those missing from
/// `known`.
///
/// Fails only when the text is empty. Text that normalizes to nothing
/// (whitespace, punctuation, single letters) gives an empty report.
pub fn analyze(text: &str, known: &KnownTerms) -> Result<ExtractionReport, ExtractError> {
    if text.is_empty() {
        return Err(ExtractError::EmptyText);
    }

    let tokens = tokenize(text);
    let extracted = extract_words(&tokens);
    let total_extracted = extracted.len();

    let new_words: Vec<ExtractedWord> = extracted
        .into_iter()
        .filter(|w| !known.contains(&w.term))
        .collect();
    let existing_words = total_extracted - new_words.len();

    debug!(
        tokens = tokens.len(),
        total_extracted,
        new = new_words.len(),
        existing = existing_words,
        known_terms = known.len(),
        "Extracted words from text"
    );

    Ok(ExtractionReport {
        total_extracted,
        new_words,
        existing_words,
    })
}
