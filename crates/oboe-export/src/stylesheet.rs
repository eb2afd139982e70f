//! Stylesheets referenced by the page template.

use oboe_core::utils::root_prefix;
use oboe_core::{Error, Result};
use oboe_vault::HtmlTemplate;
use regex::Regex;
use std::fs;
use std::path::{Component, Path};
use std::sync::LazyLock;

static LINK_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<link\b[^>]*>").unwrap());

static REL_STYLESHEET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\brel\s*=\s*"stylesheet""#).unwrap());

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhref\s*=\s*"([^"]+)""#).unwrap());

/// Hrefs of every `<link rel="stylesheet">` in `html`, in document order,
/// each listed once.
pub fn stylesheet_hrefs(html: &str) -> Vec<String> {
    let mut hrefs: Vec<String> = Vec::new();
    for tag in LINK_TAG.find_iter(html) {
        let tag = tag.as_str();
        if !REL_STYLESHEET.is_match(tag) {
            continue;
        }
        if let Some(caps) = HREF.captures(tag) {
            let href = caps[1].to_string();
            if !hrefs.contains(&href) {
                hrefs.push(href);
            }
        }
    }
    hrefs
}

/// Copy the stylesheets of `template` that exist next to it into
/// `output_dir`, keeping their relative location. Returns the copied hrefs.
pub fn copy_local_stylesheets(template: &HtmlTemplate, output_dir: &Path) -> Result<Vec<String>> {
    let mut copied = Vec::new();

    for href in stylesheet_hrefs(template.source()) {
        if is_remote(&href) {
            log::debug!("Leaving remote stylesheet {} as is", href);
            continue;
        }

        let relative = Path::new(&href);
        if relative.is_absolute()
            || relative.components().any(|c| matches!(c, Component::ParentDir))
        {
            log::warn!("Skipping stylesheet outside the template directory: {}", href);
            continue;
        }

        let source = template.base_dir().join(relative);
        if !source.is_file() {
            log::warn!("Stylesheet {} not found next to the template", href);
            continue;
        }

        let target = output_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(Error::io)?;
        }
        fs::copy(&source, &target).map_err(|e| Error::from_read(e, &source))?;
        log::info!("Copied local stylesheet {} into the output directory.", href);

        copied.push(href);
    }

    Ok(copied)
}

/// Point the copied stylesheet hrefs of a page at the output root, as seen
/// from the page at `relative_out_path`.
pub fn rewrite_stylesheets(html: &str, stylesheets: &[String], relative_out_path: &Path) -> String {
    if stylesheets.is_empty() {
        return html.to_string();
    }

    let prefix = root_prefix(relative_out_path);
    stylesheets.iter().fold(html.to_string(), |html, href| {
        html.replace(
            &format!("href=\"{}\"", href),
            &format!("href=\"{}{}\"", prefix, href),
        )
    })
}

fn is_remote(href: &str) -> bool {
    href.starts_with("//") || href.contains("://") || href.starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stylesheet_hrefs() {
        let html = r#"<head>
<link rel="stylesheet" href="style.css">
<link href="css/extra.css" type="text/css" rel="stylesheet" />
<link rel="icon" href="favicon.ico">
<link rel="stylesheet" href="style.css">
<link rel="stylesheet" href="https://cdn.example.com/base.css">
</head>"#;
        assert_eq!(
            stylesheet_hrefs(html),
            vec!["style.css", "css/extra.css", "https://cdn.example.com/base.css"]
        );
    }

    #[test]
    fn test_rewrite_by_depth() {
        let html = r#"<link rel="stylesheet" href="style.css">"#;
        let sheets = vec!["style.css".to_string()];

        assert_eq!(
            rewrite_stylesheets(html, &sheets, Path::new("a.html")),
            r#"<link rel="stylesheet" href="./style.css">"#
        );
        assert_eq!(
            rewrite_stylesheets(html, &sheets, Path::new("x/y/a.html")),
            r#"<link rel="stylesheet" href="../../style.css">"#
        );
    }

    #[test]
    fn test_copy_only_local_stylesheets() {
        let dir = TempDir::new().unwrap();
        let theme = dir.path().join("theme");
        fs::create_dir_all(theme.join("css")).unwrap();
        fs::write(theme.join("css/site.css"), "body {}").unwrap();
        fs::write(
            theme.join("page.html"),
            r#"<link rel="stylesheet" href="css/site.css">
<link rel="stylesheet" href="missing.css">
<link rel="stylesheet" href="https://cdn.example.com/base.css">
<link rel="stylesheet" href="../outside.css">"#,
        )
        .unwrap();

        let template = HtmlTemplate::load(theme.join("page.html")).unwrap();
        let output = dir.path().join("out");
        let copied = copy_local_stylesheets(&template, &output).unwrap();

        assert_eq!(copied, vec!["css/site.css"]);
        assert_eq!(fs::read_to_string(output.join("css/site.css")).unwrap(), "body {}");
    }
}
