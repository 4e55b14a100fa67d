//! Description tokenizer for word-frequency views.
//!
//! Text is lowercased and split into maximal runs of ASCII letters and
//! digits; everything else separates tokens. Tokens found in [`STOPWORDS`]
//! are dropped. The stopword set is fixed so frequency counts are
//! reproducible across runs.

/// Common English function words excluded from word counts.
pub const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "in", "for", "on", "at", "by", "with", "is", "it",
    "this", "that", "from", "as", "are", "be", "was", "were", "not", "but", "we", "you", "they",
    "their", "our", "your", "i", "he", "she", "them", "his", "her",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Split `text` into lowercase alphanumeric tokens, minus stopwords.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .map(str::to_string)
        .collect()
}
