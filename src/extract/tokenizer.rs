// Tokenizer: whitespace split, punctuation strip, lowercase.
//
// Tokens are whitespace-delimited only. A byte order mark counts as
// whitespace, so a BOM-prefixed file yields a clean first token. Hassaniya text written in Arabic
// script has no letter case, so lowercasing only affects Latin
// transliterations.

/// Characters removed from every raw token before counting.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '\'', '"', '«', '»',
];

/// Normalize a single raw token: strip punctuation, then lowercase.
pub fn normalize_token(raw: &str) -> String {
    raw.replace(STRIPPED_PUNCTUATION, "").to_lowercase()
}

/// A normalized token survives the noise filter only if it is longer than
/// one character.
pub fn is_candidate(token: &str) -> bool {
    token.chars().count() > 1
}

/// Unicode whitespace plus U+FEFF, the byte order mark.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Split text into normalized candidate tokens, preserving order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|t| !t.is_empty())
        .map(normalize_token)
        .filter(|t| is_candidate(t))
        .collect()
}
