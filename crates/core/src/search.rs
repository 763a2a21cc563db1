//! Free-text search helpers.
//!
//! User input is sanitized into a PostgreSQL `tsquery` string here so the
//! repository layer can pass it straight to `to_tsquery`. Lives in `core`
//! (zero internal deps) so both the API layer and seed tooling can use it.

/// PostgreSQL tsvector weight for title fields (highest priority).
pub const WEIGHT_TITLE: char = 'A';

/// PostgreSQL tsvector weight for description fields.
pub const WEIGHT_DESCRIPTION: char = 'B';

/// PostgreSQL tsvector weight for topic and tag fields.
pub const WEIGHT_TAGS: char = 'C';

/// Sanitize user input into a list of terms suitable for tsquery construction.
///
/// Splits on every character that is not alphanumeric or `_` (whitespace
/// included), so tsquery metacharacters anywhere inside a term -- `f(x)`,
/// `a&b`, `don't` -- can never reach `to_tsquery` and trigger a parse error.
/// Drops empty terms.
///
/// Returns `None` if the input yields no usable terms.
fn sanitize_terms(query: &str) -> Option<Vec<&str>> {
    let terms: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms)
    }
}

/// Sanitize and convert user input into a PostgreSQL `tsquery` string.
///
/// - Whitespace-separated terms are joined with `&` (AND).
/// - Empty or whitespace-only input returns `None`.
/// - Special characters that could break tsquery parsing are stripped.
///
/// # Examples
///
/// ```
/// use campushub_core::search::build_tsquery;
/// assert_eq!(build_tsquery("data structures"), Some("data & structures".to_string()));
/// assert_eq!(build_tsquery("  "), None);
/// ```
pub fn build_tsquery(query: &str) -> Option<String> {
    sanitize_terms(query).map(|terms| terms.join(" & "))
}

/// Wrap a user-supplied term in `%...%` for a substring ILIKE match, escaping
/// the LIKE wildcards so `100%` searches for a literal percent sign instead
/// of matching every row.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_term() {
        assert_eq!(build_tsquery("algorithms"), Some("algorithms".to_string()));
    }

    #[test]
    fn multiple_terms_joined_with_and() {
        assert_eq!(
            build_tsquery("data structures"),
            Some("data & structures".to_string())
        );
    }

    #[test]
    fn special_characters_stripped() {
        assert_eq!(
            build_tsquery("c++! (intro)"),
            Some("c & intro".to_string())
        );
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("algo"), "%algo%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("data_structures"), "%data\\_structures%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn interior_punctuation_splits_terms() {
        // Metacharacters inside a term must not survive into the tsquery.
        assert_eq!(
            build_tsquery("f(x) derivatives"),
            Some("f & x & derivatives".to_string())
        );
        assert_eq!(build_tsquery("a&b|c"), Some("a & b & c".to_string()));
        assert_eq!(build_tsquery("don't"), Some("don & t".to_string()));
    }

    #[test]
    fn empty_and_whitespace_return_none() {
        assert_eq!(build_tsquery(""), None);
        assert_eq!(build_tsquery("   "), None);
    }

    #[test]
    fn underscores_preserved() {
        assert_eq!(
            build_tsquery("operating_systems lab"),
            Some("operating_systems & lab".to_string())
        );
    }
}
