// tokens.rs — Tokenization and fuzzy matching.
//
// Free text becomes lowercase alphanumeric tokens above a minimum length.
// Token-vs-keyword matching is bidirectional substring containment: "emails"
// matches the keyword "email", "scheduled" matches "schedule". That tolerates
// pluralization and compounding at the cost of false positives on short
// tokens ("cat" matches "category").

/// Minimum character count for a token to survive [`tokenize`].
pub const MIN_TOKEN_LEN: usize = 3;

/// Split `text` into lowercase alphanumeric tokens of at least
/// [`MIN_TOKEN_LEN`] characters. Order is preserved; duplicates are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_min(text, MIN_TOKEN_LEN)
}

/// Split `text` into lowercase alphanumeric tokens of at least `min_len`
/// characters.
pub fn tokenize_min(text: &str, min_len: usize) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= min_len)
        .map(str::to_string)
        .collect()
}

/// True when either string contains the other. Callers pass lowercase input;
/// this function does not normalize.
pub fn bidirectional_contains(token: &str, keyword: &str) -> bool {
    keyword.contains(token) || token.contains(keyword)
}

/// Case-insensitive substring containment.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
