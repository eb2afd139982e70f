//! Tag parser: ` #tag`, ` #multi-word_tag`

use regex::Regex;
use std::sync::LazyLock;

/// `#` preceded by whitespace, followed by letters, underscores or hyphens
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s#([\p{L}_\-]+)").unwrap());

/// Extract tag names (without `#`) from `content`, longest first.
///
/// The sort is stable, so tags of equal length keep document order. Longer
/// tags come before their prefixes (`#ab` before `#a`), which keeps
/// substring-sensitive consumers from matching a prefix first.
///
/// # Example
/// ```
/// use oboe_parser::extract_tags;
///
/// let tags = extract_tags("Notes on #rust and #rustacean");
/// assert_eq!(tags, vec!["rustacean", "rust"]);
/// ```
pub fn extract_tags(content: &str) -> Vec<String> {
    if !content.contains('#') {
        return Vec::new();
    }

    let mut tags: Vec<String> = TAG_PATTERN
        .captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect();

    tags.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tag() {
        assert_eq!(extract_tags("Hello #project [[B]]"), vec!["project"]);
    }

    #[test]
    fn test_longest_first() {
        assert_eq!(extract_tags("x #a y #ab"), vec!["ab", "a"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "one #alpha two #be three #gamma-ray";
        assert_eq!(extract_tags(text), extract_tags(text));
        assert_eq!(extract_tags(text), vec!["gamma-ray", "alpha", "be"]);
    }

    #[test]
    fn test_unicode_tags() {
        assert_eq!(extract_tags("Über #größe"), vec!["größe"]);
    }

    #[test]
    fn test_requires_preceding_whitespace() {
        assert!(extract_tags("#start of text").is_empty());
        assert!(extract_tags("url.com/#anchor and a#b").is_empty());
        assert_eq!(extract_tags("line\n#next"), vec!["next"]);
    }

    #[test]
    fn test_headings_are_not_tags() {
        assert!(extract_tags("intro\n# Heading\n## Sub").is_empty());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(extract_tags(" #Rust #rust"), vec!["Rust", "rust"]);
    }
}
