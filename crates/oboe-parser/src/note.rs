//! A single source note and its derived artifacts.

use oboe_core::utils::{md_link, relative_to, slug_case};
use oboe_core::{Error, ExportConfig, MarkdownRender, Result};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::parsers::{convert_wikilinks, extract_links, extract_tags};

/// One Markdown document of the vault.
///
/// Title, output path, tags and links are fixed at construction. The
/// rendered body is computed on first use and cached; the backlink fragment
/// is attached once by the backlink pass.
#[derive(Debug)]
pub struct Note {
    path: PathBuf,
    title: String,
    content: String,
    tags: Vec<String>,
    links: Vec<String>,
    out_path: PathBuf,
    relative_out_path: PathBuf,
    link_extension: Option<String>,
    html: OnceLock<String>,
    backlink_html: String,
}

impl Note {
    /// Read and parse the note at `path`.
    ///
    /// Fails with [`Error::FileNotFound`] when the file does not exist.
    pub fn parse(path: impl Into<PathBuf>, config: &ExportConfig) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::from_read(e, &path))?;
        let note = Self::from_content(path, content, config)?;
        log::debug!(
            "Parsed {}: {} tags, {} links extracted",
            note.path.display(),
            note.tags.len(),
            note.links.len()
        );
        Ok(note)
    }

    /// Build a note from text that has already been read.
    pub fn from_content(
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        config: &ExportConfig,
    ) -> Result<Self> {
        let path = path.into();
        let content = content.into();

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| Error::invalid_path(format!("No file name: {}", path.display())))?;

        let relative_out_path = output_relative_path(&path, &title, config)?;
        let out_path = config.output_dir.join(&relative_out_path);

        let tags = extract_tags(&content);
        let links = extract_links(&content);

        Ok(Self {
            path,
            title,
            content,
            tags,
            links,
            out_path,
            relative_out_path,
            link_extension: config
                .html_link_extensions
                .then(|| config.output_extension.clone()),
            html: OnceLock::new(),
            backlink_html: String::new(),
        })
    }

    /// Source path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Title, the file name without extension
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Identifier that wikilinks must match to point at this note
    pub fn identifier(&self) -> &str {
        &self.title
    }

    /// Raw Markdown text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Tags, longest first
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Outbound link identifiers in document order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Output path including the output root
    pub fn out_path(&self) -> &Path {
        &self.out_path
    }

    /// Output path relative to the output root
    pub fn relative_out_path(&self) -> &Path {
        &self.relative_out_path
    }

    /// Slug used as link target for this note
    pub fn slug(&self) -> String {
        slug_or_title(&self.title)
    }

    /// Markdown link to this note showing `display_text`
    pub fn format_link(&self, display_text: &str) -> String {
        md_link(display_text, &self.slug(), self.link_extension.as_deref())
    }

    /// Markdown link to this note showing its title
    pub fn md_link(&self) -> String {
        self.format_link(&self.title)
    }

    /// Rendered HTML body, computed on first call
    pub fn html(&self, renderer: &dyn MarkdownRender) -> &str {
        self.html.get_or_init(|| {
            let converted = convert_wikilinks(&self.content, self.link_extension.as_deref());
            renderer.render(&converted)
        })
    }

    /// Rendered backlink fragment (empty when nothing links here)
    pub fn backlink_html(&self) -> &str {
        &self.backlink_html
    }

    /// Attach the rendered backlink fragment.
    pub fn set_backlink_html(&mut self, html: String) {
        self.backlink_html = html;
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Note {}

fn slug_or_title(title: &str) -> String {
    let slug = slug_case(title);
    if slug.is_empty() {
        title.to_string()
    } else {
        slug
    }
}

/// `<dir relative to vault root>/<slug>.<ext>`
fn output_relative_path(path: &Path, title: &str, config: &ExportConfig) -> Result<PathBuf> {
    let relative = relative_to(path, &config.vault_root)?;
    let file_name = format!("{}.{}", slug_or_title(title), config.output_extension);

    Ok(match relative.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    })
}
