//! # Oboe Parser
//!
//! Obsidian note parsing and Markdown rendering built on `pulldown-cmark`.
//!
//! This crate provides:
//! - [`Note`]: one source document with its tags, links, output path and
//!   lazily rendered body
//! - Link extraction: `[[Note]]`, `[[Note|Alias]]`, `[[Note#Heading]]`
//! - Tag extraction: whitespace-preceded `#tag`, longest first
//! - Wikilink conversion into Markdown links before rendering
//! - [`MarkdownRenderer`]: the fixed-extension HTML renderer
//!
//! ## Quick Start
//!
//! ```
//! use oboe_core::{ExportConfig, MarkdownRender};
//! use oboe_parser::{MarkdownRenderer, Note};
//!
//! let config = ExportConfig::default();
//! let note = Note::from_content("./A.md", "Hello #project [[B]]", &config).unwrap();
//!
//! assert_eq!(note.tags(), ["project"]);
//! assert_eq!(note.links(), ["B"]);
//!
//! let html = note.html(&MarkdownRenderer::new());
//! assert!(html.contains("<a href=\"b.html\">B</a>"));
//! ```
//!
//! ## Code Awareness
//!
//! Wikilink conversion and underscore escaping skip code blocks, inline code
//! and raw HTML. Link and tag *extraction* runs on the raw text, so a link
//! inside a code span still counts as a reference.

mod excluded;
mod markdown;
mod note;
pub mod parsers;

pub use markdown::MarkdownRenderer;
pub use note::Note;
pub use parsers::{WikiLink, convert_wikilinks, extract_links, extract_tags};

/// Convenient prelude for common imports.
pub mod prelude {
    pub use crate::{MarkdownRenderer, Note};
    pub use crate::{convert_wikilinks, extract_links, extract_tags};
    pub use oboe_core::prelude::*;
}
