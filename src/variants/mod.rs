// Grammatical variants: plurals, conjugations, gendered and diminutive
// forms proposed by a language model and stored per entry.
//
// VariantGenerator is the seam; OpenAiVariantGenerator is the only
// provider today.

pub mod generate;
pub mod openai;
pub mod parse;
pub mod traits;

pub use generate::{generate_for_word, list_for_word};
pub use openai::OpenAiVariantGenerator;
pub use parse::parse_variants;
pub use traits::{GeneratedVariant, VariantGenerator};
