use ahash::RandomState;
use std::collections::HashSet;

/// Token set with a fast hasher; token extraction runs once per record on
/// every index build.
pub type TokenSet = HashSet<String, RandomState>;

/// Extract normalized tokens from a text field.
///
/// Tokens are lower-cased and split on non-alphanumeric boundaries. Tokens
/// outside `[min_len, max_len]` are dropped.
pub fn extract_tokens(text: &str, min_len: usize, max_len: usize) -> TokenSet {
    let mut tokens = TokenSet::default();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                current.push(lower);
            }
        } else if !current.is_empty() {
            add_token(&mut tokens, &current, min_len, max_len);
            current.clear();
        }
    }

    if !current.is_empty() {
        add_token(&mut tokens, &current, min_len, max_len);
    }

    tokens
}

/// Extract query tokens in a deterministic (sorted) order.
///
/// Uses the same normalization as [`extract_tokens`] so a query token always
/// lines up with the index dictionary.
pub fn tokenize_query(query: &str, min_len: usize, max_len: usize) -> Vec<String> {
    let mut result: Vec<_> = extract_tokens(query, min_len, max_len)
        .into_iter()
        .collect();
    result.sort();
    result
}

/// Normalize a raw query string into its effective form (trim + lower-case).
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn add_token(tokens: &mut TokenSet, token: &str, min_len: usize, max_len: usize) {
    let len = token.chars().count();
    if len >= min_len && len <= max_len {
        tokens.insert(token.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_non_alphanumeric() {
        let tokens = extract_tokens("hello, world! foo-bar_baz", 2, 128);
        assert!(tokens.contains("hello"));
        assert!(tokens.contains("world"));
        assert!(tokens.contains("foo"));
        assert!(tokens.contains("bar"));
        assert!(tokens.contains("baz"));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_lowercase_normalization() {
        let tokens = extract_tokens("John JOHNNY", 2, 128);
        assert!(tokens.contains("john"));
        assert!(tokens.contains("johnny"));
    }

    #[test]
    fn test_length_bounds() {
        let tokens = extract_tokens("a ab abc", 2, 2);
        assert!(!tokens.contains("a"));
        assert!(tokens.contains("ab"));
        assert!(!tokens.contains("abc"));
    }

    #[test]
    fn test_tokenize_query_sorted() {
        let tokens = tokenize_query("zulu alpha Mike", 2, 128);
        assert_eq!(tokens, vec!["alpha", "mike", "zulu"]);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  John Doe "), "john doe");
        assert_eq!(normalize_query("   "), "");
    }
}
