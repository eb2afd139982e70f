//! # HTML Export
//!
//! Writes a loaded [`Vault`] as a static site: one HTML page per retained
//! note, laid out like the vault under the output directory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oboe_export::HtmlExporter;
//! use oboe_vault::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ExportConfig::builder("/path/to/vault")
//!         .template("/path/to/template.html")
//!         .build()?;
//!
//!     let vault = Vault::new(config)?;
//!     let summary = HtmlExporter::new(&vault).export()?;
//!     println!("{} pages written", summary.notes_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Page Layout
//!
//! With a template, each page is the template with `{title}`, `{content}`,
//! `{backlinks}` and `{sidebar}` substituted (see [`apply_template`]).
//! Stylesheets referenced by the template and found next to it are copied
//! into the output directory and linked relative to each page.
//!
//! Without a template a page is the rendered content, a newline, and the
//! backlink block.

pub mod stylesheet;
pub mod template;

pub use stylesheet::{copy_local_stylesheets, rewrite_stylesheets, stylesheet_hrefs};
pub use template::{TemplateValues, apply_template};

use oboe_core::prelude::*;
use oboe_graph::SidebarTree;
use oboe_parser::Note;
use oboe_vault::{HtmlTemplate, Vault};
use std::fs;

/// Outcome of an export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Pages written
    pub notes_written: usize,
    /// Hrefs of the stylesheets copied next to the pages
    pub stylesheets: Vec<String>,
}

/// Writes the pages of a vault
pub struct HtmlExporter<'a> {
    vault: &'a Vault,
}

impl<'a> HtmlExporter<'a> {
    pub fn new(vault: &'a Vault) -> Self {
        Self { vault }
    }

    /// Write every retained note. Directories are created as needed.
    pub fn export(&self) -> Result<ExportSummary> {
        let config = self.vault.config();
        fs::create_dir_all(&config.output_dir).map_err(Error::io)?;

        let summary = match self.vault.template() {
            Some(template) => self.export_with_template(template)?,
            None => self.export_plain()?,
        };

        log::info!(
            "Exported {} notes to \"{}\"",
            summary.notes_written,
            config.output_dir.display()
        );
        Ok(summary)
    }

    fn export_with_template(&self, template: &HtmlTemplate) -> Result<ExportSummary> {
        let config = self.vault.config();
        let stylesheets = copy_local_stylesheets(template, &config.output_dir)?;
        let sidebar = SidebarTree::build(self.vault.notes(), &config.output_root_name()).render();

        let mut written = 0;
        for note in self.vault.notes() {
            log::debug!(
                "Formatting {} according to the supplied HTML template...",
                note.title()
            );
            let values = TemplateValues {
                title: note.title(),
                content: note.html(self.vault.renderer()),
                backlinks: note.backlink_html(),
                sidebar: &sidebar,
            };
            let html = apply_template(template.source(), &values)?;
            let html = rewrite_stylesheets(&html, &stylesheets, note.relative_out_path());

            write_page(note, &html)?;
            written += 1;
        }

        Ok(ExportSummary {
            notes_written: written,
            stylesheets,
        })
    }

    fn export_plain(&self) -> Result<ExportSummary> {
        let mut written = 0;
        for note in self.vault.notes() {
            log::debug!("Exporting {} without using a template.", note.title());
            let html = format!(
                "{}\n{}",
                note.html(self.vault.renderer()),
                note.backlink_html()
            );
            write_page(note, &html)?;
            written += 1;
        }

        Ok(ExportSummary {
            notes_written: written,
            stylesheets: vec![],
        })
    }
}

/// Export `vault` with the default exporter
pub fn export_html(vault: &Vault) -> Result<ExportSummary> {
    HtmlExporter::new(vault).export()
}

fn write_page(note: &Note, html: &str) -> Result<()> {
    let out_path = note.out_path();
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(Error::io)?;
    }
    fs::write(out_path, html).map_err(Error::io)?;
    log::debug!("{} written.", note.title());
    Ok(())
}
