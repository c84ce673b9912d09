//! Identifier normalization for project and task references.

/// Normalize a project or task identifier.
///
/// Trims, lowercases, and joins words separated by whitespace, `_` or `-`
/// with a single `-`. Returns `None` when nothing is left.
///
/// ```
/// use clockin::parser::sid::normalize;
///
/// assert_eq!(normalize("  My Project "), Some("my-project".to_string()));
/// assert_eq!(normalize("api__v2"), Some("api-v2".to_string()));
/// assert_eq!(normalize("   "), None);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let words: Vec<String> = raw
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple() {
        assert_eq!(normalize("backend"), Some("backend".to_string()));
    }

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("Client - Acme"), Some("client-acme".to_string()));
        assert_eq!(normalize("--a--b--"), Some("a-b".to_string()));
    }

    #[test]
    fn test_normalize_keeps_other_characters() {
        assert_eq!(normalize("v2.1"), Some("v2.1".to_string()));
        assert_eq!(normalize("Café"), Some("café".to_string()));
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("_-_"), None);
    }
}
