//! # Vault
//!
//! Loads an Obsidian vault into memory, ready for export:
//! - Reads the HTML template first, so a bad path fails fast
//! - Discovers the folders to scan (explicit or every non-hidden subdirectory)
//! - Parses every `.md` note once
//! - Applies the tag filter, then attaches rendered backlinks
//!
//! ## Quick Start
//!
//! ```no_run
//! use oboe_vault::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ExportConfig::builder("/path/to/vault")
//!         .output_dir("site")
//!         .filter(".private")
//!         .build()?;
//!
//!     let vault = Vault::new(config)?;
//!     for note in vault.notes() {
//!         println!("{} -> {}", note.title(), note.out_path().display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod vault;

pub use vault::{HtmlTemplate, Vault};

pub mod prelude {
    pub use crate::vault::{HtmlTemplate, Vault};
    pub use oboe_graph::prelude::*;
}
