//! Markdown to HTML rendering built on pulldown-cmark.
//!
//! The renderer has a fixed extension set:
//! - newlines inside a paragraph become `<br />`
//! - headings get slug ids (`intro`, `intro-2`, ...)
//! - strikethrough, tables, footnotes and task lists
//! - block tags carrying `markdown="1"` have their content parsed as Markdown
//! - `_` never starts emphasis, so identifiers and TeX survive untouched

use oboe_core::MarkdownRender;
use oboe_core::utils::slug_case;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::excluded::ExcludedRanges;

/// Block opening tag on its own line carrying `markdown="1"`
static MARKDOWN_BLOCK_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(\s*)<([A-Za-z][A-Za-z0-9]*)([^>]*?)\s+markdown=["']?1["']?([^>]*)>\s*$"#)
        .unwrap()
});

/// Markdown renderer with the exporter's extension set.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_TASKLISTS);
        Self { options }
    }
}

impl MarkdownRender for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let source = escape_underscores(&expand_markdown_in_html(text));

        let events: Vec<Event<'_>> = Parser::new_ext(&source, self.options)
            .map(|event| match event {
                Event::SoftBreak => Event::HardBreak,
                other => other,
            })
            .collect();
        let events = assign_heading_ids(events);

        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }
}

/// Surround the content of `markdown="1"` blocks with blank lines so the
/// HTML block ends and the content is parsed as Markdown. The attribute is
/// dropped from the output.
fn expand_markdown_in_html(text: &str) -> String {
    if !text.contains("markdown=") {
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len() + 16);
    let mut open: Vec<String> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = MARKDOWN_BLOCK_OPEN.captures(line) {
            output.push_str(&format!("{}<{}{}{}>\n\n", &caps[1], &caps[2], &caps[3], &caps[4]));
            open.push(caps[2].to_ascii_lowercase());
            continue;
        }

        let closes = open
            .last()
            .is_some_and(|tag| line.trim().eq_ignore_ascii_case(&format!("</{}>", tag)));
        if closes {
            open.pop();
            output.push('\n');
        }
        output.push_str(line);
        output.push('\n');
    }

    output
}

/// Escape every `_` outside code, raw HTML and autolinks.
fn escape_underscores(text: &str) -> String {
    if !text.contains('_') {
        return text.to_string();
    }

    let excluded = ExcludedRanges::scan(text);
    let mut output = String::with_capacity(text.len() + 8);
    let mut previous = None;

    for (offset, c) in text.char_indices() {
        if c == '_' && previous != Some('\\') && !excluded.contains(offset) {
            output.push('\\');
        }
        output.push(c);
        previous = Some(c);
    }

    output
}

/// Give every heading an id derived from its text, deduplicated per document.
fn assign_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut used: HashMap<String, usize> = HashMap::new();
    let mut i = 0;

    while i < events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { .. })) {
            i += 1;
            continue;
        }

        let mut text = String::new();
        let mut end = i + 1;
        while end < events.len() {
            match &events[end] {
                Event::End(TagEnd::Heading(_)) => break,
                Event::Text(t) | Event::Code(t) => text.push_str(t),
                _ => {}
            }
            end += 1;
        }

        let id = unique_id(&mut used, slug_case(&text));
        if let Event::Start(Tag::Heading { id: heading_id, .. }) = &mut events[i] {
            *heading_id = Some(CowStr::from(id));
        }
        i = end + 1;
    }

    events
}

fn unique_id(used: &mut HashMap<String, usize>, slug: String) -> String {
    let base = if slug.is_empty() {
        "section".to_string()
    } else {
        slug
    };

    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{}-{}", base, count)
    }
}
