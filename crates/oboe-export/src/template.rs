//! Placeholder substitution for page templates.
//!
//! Recognized placeholders are `{title}`, `{content}`, `{backlinks}` and
//! `{sidebar}`. `{{` and `}}` produce literal braces. Any other brace that
//! does not open a `{identifier}` is copied as is, so inline CSS and scripts
//! survive untouched.

use oboe_core::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Matches `{identifier}` at the start of the input
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Values substituted into a template for one note
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateValues<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub backlinks: &'a str,
    pub sidebar: &'a str,
}

impl<'a> TemplateValues<'a> {
    fn get(&self, name: &str) -> Option<&'a str> {
        match name {
            "title" => Some(self.title),
            "content" => Some(self.content),
            "backlinks" => Some(self.backlinks),
            "sidebar" => Some(self.sidebar),
            _ => None,
        }
    }
}

/// Substitute `values` into `template` in a single pass.
///
/// Substituted text is never scanned again, so braces inside note content
/// are left alone. An unknown `{identifier}` is an [`Error::TemplateError`].
///
/// ```
/// use oboe_export::{TemplateValues, apply_template};
///
/// let values = TemplateValues { title: "A", content: "<p>x</p>", ..Default::default() };
/// let html = apply_template("<h1>{title}</h1>{content}{{}}", &values).unwrap();
/// assert_eq!(html, "<h1>A</h1><p>x</p>{}");
/// ```
pub fn apply_template(template: &str, values: &TemplateValues<'_>) -> Result<String> {
    let mut html = String::with_capacity(template.len() + values.content.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        html.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            html.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            html.push('}');
            rest = after;
        } else if let Some(caps) = PLACEHOLDER.captures(tail) {
            let name = &caps[1];
            let value = values.get(name).ok_or_else(|| {
                Error::template_error(format!("Unknown placeholder {{{}}}", name))
            })?;
            html.push_str(value);
            rest = &tail[caps[0].len()..];
        } else {
            // Lone brace
            html.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }

    html.push_str(rest);
    Ok(html)
}
