//! # Oboe
//!
//! Converts an Obsidian vault into a static HTML site. Wikilinks become
//! page links, every page lists the notes that link to it, and an optional
//! template adds a sidebar and shared stylesheets.
//!
//! ```no_run
//! use oboe::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ExportConfig::builder("my-vault").output_dir("site").build()?;
//!     let summary = oboe::run(config)?;
//!     println!("{} pages written", summary.notes_written);
//!     Ok(())
//! }
//! ```

pub use oboe_export::{ExportSummary, HtmlExporter, export_html};
pub use oboe_vault::Vault;

use oboe_core::prelude::*;

/// Load the vault described by `config` and write it as HTML.
pub fn run(config: ExportConfig) -> Result<ExportSummary> {
    let vault = Vault::new(config)?;
    export_html(&vault)
}

pub mod prelude {
    pub use crate::run;
    pub use oboe_export::{ExportSummary, HtmlExporter};
    pub use oboe_vault::prelude::*;
}
