//! # Oboe Core
//!
//! Error types, configuration and shared helpers for the vault exporter.
//! This crate defines the canonical types that all other crates depend on.
//!
//! ## Core Modules
//!
//! - [`error`] - Error type and Result alias
//! - [`config`] - Export configuration with builder and YAML loading
//! - [`render`] - The Markdown rendering seam
//! - [`utils`] - Slugs, link formatting and output path arithmetic
//!
//! ## Usage Examples
//!
//! ### Configuration
//!
//! ```
//! use oboe_core::prelude::*;
//!
//! let config = ExportConfig::default();
//! assert!(config.backlink_dash);
//! assert_eq!(config.output_extension, "html");
//! ```
//!
//! ### Error Handling
//!
//! ```
//! use oboe_core::prelude::*;
//!
//! fn load() -> Result<()> {
//!     Err(Error::config_error("no vault"))
//! }
//! assert!(load().is_err());
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use render::MarkdownRender;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ExportConfig, ExportConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::render::MarkdownRender;
    pub use crate::utils::{md_link, slug_case};
}
