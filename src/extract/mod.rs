// Word extraction: find candidate dictionary terms in running text.

pub mod error;
pub mod frequency;
pub mod tokenizer;

pub use error::ExtractError;
pub use frequency::{analyze, extract_words, ExtractedWord, ExtractionReport, KnownTerms};
pub use tokenizer::tokenize;
