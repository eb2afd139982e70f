//! Wikilink parser: `[[Note]]`, `[[Note|Display]]`, `[[Note#Heading]]`
//!
//! Extraction works on the raw text; conversion to Markdown links skips
//! code and raw HTML.

use oboe_core::utils::{md_link, slug_case};
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::excluded::ExcludedRanges;

/// Identifier up to the first `|`, `#` or `]`, then the rest of the link.
static LINK_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[{2}([^\]]*?)[|#\]]([^\]]*?)\]+").unwrap());

/// Whole wikilink or embed: `[[...]]` / `![[...]]`
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!?)\[\[([^\]\n]+)\]\]").unwrap());

/// Extract the link identifiers of every wikilink in `content`.
///
/// The identifier is the part before the first `|` or `#`, trimmed.
/// Duplicates are kept in document order; empty identifiers (such as
/// `[[#Heading]]`) are dropped.
///
/// # Example
/// ```
/// use oboe_parser::extract_links;
///
/// let links = extract_links("See [[Note]], [[Other|alias]] and [[Third#Part]]");
/// assert_eq!(links, vec!["Note", "Other", "Third"]);
/// ```
pub fn extract_links(content: &str) -> Vec<String> {
    if !content.contains("[[") {
        return Vec::new();
    }

    LINK_TARGET
        .captures_iter(content)
        .filter_map(|caps| {
            let target = caps.get(1)?.as_str().trim();
            (!target.is_empty()).then(|| target.to_string())
        })
        .collect()
}

/// A wikilink split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink<'a> {
    /// Note name (may be empty for same-note heading links)
    pub target: &'a str,
    /// Heading fragment after `#`
    pub heading: Option<&'a str>,
    /// Display text after `|`
    pub display: Option<&'a str>,
}

impl<'a> WikiLink<'a> {
    /// Split the inside of `[[...]]`.
    pub fn parse(inner: &'a str) -> Self {
        let (reference, display) = match inner.split_once('|') {
            Some((reference, display)) => (reference, Some(display.trim())),
            None => (inner, None),
        };
        let (target, heading) = match reference.split_once('#') {
            Some((target, heading)) => (target.trim(), Some(heading.trim())),
            None => (reference.trim(), None),
        };

        Self {
            target,
            heading,
            display,
        }
    }

    /// Text shown for the link.
    pub fn label(&self) -> &'a str {
        match (self.display, self.heading) {
            (Some(display), _) if !display.is_empty() => display,
            _ if !self.target.is_empty() => self.target,
            (_, Some(heading)) => heading,
            _ => self.target,
        }
    }

    /// Link target: slug of the note name, optional extension, heading anchor.
    pub fn href(&self, extension: Option<&str>) -> String {
        let mut href = String::new();
        if !self.target.is_empty() {
            href.push_str(&slug_case(self.target));
            if let Some(ext) = extension {
                href.push('.');
                href.push_str(ext);
            }
        }
        if let Some(heading) = self.heading.filter(|h| !h.is_empty()) {
            href.push('#');
            href.push_str(&slug_case(heading));
        }
        href
    }

    fn is_attachment(&self) -> bool {
        self.target
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| !stem.is_empty() && !ext.eq_ignore_ascii_case("md"))
    }
}

/// Replace wikilinks outside code with Markdown links.
///
/// `[[Note|Text]]` becomes `[Text](note.html)` (extension only when given),
/// `[[Note#Part]]` becomes `[Note](note.html#part)`, and embeds of non-note
/// files such as `![[image.png]]` become Markdown images.
pub fn convert_wikilinks(content: &str, extension: Option<&str>) -> String {
    if !content.contains("[[") {
        return content.to_string();
    }

    let excluded = ExcludedRanges::scan(content);

    WIKILINK
        .replace_all(content, |caps: &Captures| {
            let whole = &caps[0];
            let start = caps.get(0).map(|m| m.start()).unwrap_or_default();
            if excluded.contains(start) {
                return whole.to_string();
            }

            let link = WikiLink::parse(&caps[2]);
            if link.target.is_empty() && link.heading.is_none() {
                return whole.to_string();
            }

            let is_embed = !caps[1].is_empty();
            if is_embed && link.is_attachment() {
                format!("![{}](<{}>)", link.label(), link.target)
            } else {
                md_link(link.label(), &link.href(extension), None)
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_wikilink() {
        assert_eq!(extract_links("See [[Note]]"), vec!["Note"]);
    }

    #[test]
    fn test_wikilink_with_display_text() {
        assert_eq!(extract_links("See [[Note|Display Text]]"), vec!["Note"]);
    }

    #[test]
    fn test_wikilink_with_heading() {
        assert_eq!(extract_links("See [[Note#Heading]]"), vec!["Note"]);
        assert_eq!(extract_links("See [[Note#Heading|Shown]]"), vec!["Note"]);
    }

    #[test]
    fn test_identifier_is_trimmed() {
        assert_eq!(extract_links("[[ Spaced Out | text]]"), vec!["Spaced Out"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        assert_eq!(extract_links("[[A]] [[B]] [[A]]"), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_malformed_links_are_ignored() {
        assert!(extract_links("[[unterminated and [single] brackets").is_empty());
        assert!(extract_links("[[]] and [[#Only heading]]").is_empty());
    }

    #[test]
    fn test_wikilink_parse_parts() {
        let link = WikiLink::parse("Note#Part|Shown");
        assert_eq!(link.target, "Note");
        assert_eq!(link.heading, Some("Part"));
        assert_eq!(link.display, Some("Shown"));
        assert_eq!(link.label(), "Shown");
    }

    #[test]
    fn test_convert_plain_link() {
        assert_eq!(
            convert_wikilinks("Go to [[My Note]].", Some("html")),
            "Go to [My Note](my-note.html)."
        );
        assert_eq!(convert_wikilinks("[[My Note]]", None), "[My Note](my-note)");
    }

    #[test]
    fn test_convert_display_and_heading() {
        assert_eq!(
            convert_wikilinks("[[Note|the note]] [[Note#Sub Part]]", Some("html")),
            "[the note](note.html) [Note](note.html#sub-part)"
        );
    }

    #[test]
    fn test_convert_same_note_heading() {
        assert_eq!(convert_wikilinks("[[#Intro]]", Some("html")), "[Intro](#intro)");
    }

    #[test]
    fn test_convert_image_embed() {
        assert_eq!(
            convert_wikilinks("![[diagram one.png]]", Some("html")),
            "![diagram one.png](<diagram one.png>)"
        );
    }

    #[test]
    fn test_note_embed_becomes_link() {
        assert_eq!(convert_wikilinks("![[Other]]", Some("html")), "[Other](other.html)");
    }

    #[test]
    fn test_code_is_left_alone() {
        let content = "`[[Code]]` and [[Real]]";
        assert_eq!(
            convert_wikilinks(content, Some("html")),
            "`[[Code]]` and [Real](real.html)"
        );
    }
}
