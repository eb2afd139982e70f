//! Byte ranges where Obsidian syntax must not be rewritten.
//!
//! A pulldown-cmark pass records code blocks, inline code, raw HTML and
//! autolinks; footnote labels are matched directly. Rewrites that run on the
//! raw text (wikilink conversion, underscore escaping) consult these ranges
//! and leave them untouched.

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Footnote label, as a reference `[^label]` or a definition `[^label]:`
static FOOTNOTE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\^[^\]\s]+\]").unwrap());

/// Sorted, merged byte ranges to exclude from text rewrites.
#[derive(Debug, Default, Clone)]
pub(crate) struct ExcludedRanges {
    ranges: Vec<Range<usize>>,
}

impl ExcludedRanges {
    /// Scan `content` and collect code, HTML, autolink and footnote label
    /// ranges.
    pub(crate) fn scan(content: &str) -> Self {
        let mut excluded = Self::default();

        if content.contains("[^") {
            for label in FOOTNOTE_LABEL.find_iter(content) {
                excluded.add(label.range());
            }
        }

        if !content.contains(['`', '<', '~']) && !content.contains("    ") && !content.contains('\t')
        {
            excluded.optimize();
            return excluded;
        }

        let mut opts = Options::empty();
        opts.insert(Options::ENABLE_TABLES);
        opts.insert(Options::ENABLE_STRIKETHROUGH);

        let mut code_block_start = None;
        for (event, range) in Parser::new_ext(content, opts).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => code_block_start = Some(range.start),
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(start) = code_block_start.take() {
                        excluded.add(start..range.end);
                    }
                }
                Event::Code(_) | Event::Html(_) | Event::InlineHtml(_) => excluded.add(range),
                Event::Start(Tag::Link {
                    link_type: LinkType::Autolink | LinkType::Email,
                    ..
                }) => excluded.add(range),
                _ => {}
            }
        }

        excluded.optimize();
        excluded
    }

    /// Check if a byte offset falls within any excluded range.
    #[inline]
    pub(crate) fn contains(&self, offset: usize) -> bool {
        // First range starting after the offset; the candidate is the one before it.
        let idx = self.ranges.partition_point(|r| r.start <= offset);
        idx > 0 && offset < self.ranges[idx - 1].end
    }

    fn add(&mut self, range: Range<usize>) {
        self.ranges.push(range);
    }

    /// Sort and merge overlapping ranges for efficient lookup.
    fn optimize(&mut self) {
        if self.ranges.is_empty() {
            return;
        }
        self.ranges.sort_by_key(|r| r.start);

        let mut merged = Vec::with_capacity(self.ranges.len());
        let mut current = self.ranges[0].clone();

        for range in self.ranges.iter().skip(1) {
            if range.start <= current.end {
                current.end = current.end.max(range.end);
            } else {
                merged.push(current);
                current = range.clone();
            }
        }
        merged.push(current);
        self.ranges = merged;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code_is_excluded() {
        let content = "text `code_here` more";
        let excluded = ExcludedRanges::scan(content);
        let offset = content.find("code_here").unwrap();
        assert!(excluded.contains(offset));
        assert!(!excluded.contains(0));
    }

    #[test]
    fn test_fenced_block_is_excluded() {
        let content = "before\n\n```\n[[Inside]]\n```\n\nafter [[Outside]]";
        let excluded = ExcludedRanges::scan(content);
        assert!(excluded.contains(content.find("[[Inside]]").unwrap()));
        assert!(!excluded.contains(content.find("[[Outside]]").unwrap()));
    }

    #[test]
    fn test_footnote_labels_are_excluded() {
        let content = "Text[^my_note]\n\n[^my_note]: body_text";
        let excluded = ExcludedRanges::scan(content);
        assert!(excluded.contains(content.find("my_note").unwrap()));
        assert!(excluded.contains(content.rfind("my_note").unwrap()));
        assert!(!excluded.contains(content.find("body_text").unwrap()));
    }

    #[test]
    fn test_plain_text_has_no_ranges() {
        let excluded = ExcludedRanges::scan("just words and [[Links]]");
        assert!(!excluded.contains(0));
        assert!(excluded.ranges.is_empty());
    }
}
