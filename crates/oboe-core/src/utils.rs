//! Shared utilities for operations across oboe crates.
//!
//! Provides helpers for:
//! - Slug generation for link targets and heading ids
//! - Markdown link formatting
//! - Path arithmetic between the vault and the output tree

use crate::{Error, Result};
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Convert text into a URL slug.
///
/// NFKC-normalizes, lowercases, drops everything that is not a word
/// character, whitespace or hyphen, collapses whitespace/hyphen runs into a
/// single `-` and trims leading/trailing `-` and `_`.
///
/// ```
/// use oboe_core::utils::slug_case;
///
/// assert_eq!(slug_case("My Note (draft)"), "my-note-draft");
/// assert_eq!(slug_case("  Ünïcode -- title "), "ünïcode-title");
/// ```
pub fn slug_case(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.nfkc().flat_map(char::to_lowercase) {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.push(c);
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Format a Markdown link, optionally appending `.{extension}` to the target.
pub fn md_link(text: &str, link: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("[{}]({}.{})", text, link, ext),
        None => format!("[{}]({})", text, link),
    }
}

/// Escape the characters that are significant inside HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Express `path` relative to `root`, rejecting paths that escape it.
pub fn relative_to(path: &Path, root: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(root).map_err(|_| {
        Error::invalid_path(format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        ))
    })?;

    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(Error::invalid_path(format!(
            "{} escapes {}",
            path.display(),
            root.display()
        )));
    }

    Ok(relative.to_path_buf())
}

/// Prefix that leads from a file at `relative_file` (relative to the output
/// root) back to the output root: `./` at the root, `../` per directory level.
pub fn root_prefix(relative_file: &Path) -> String {
    let depth = relative_file
        .parent()
        .map(|p| p.components().count())
        .unwrap_or(0);

    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

/// Join path components with `/`, independent of the host separator.
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
