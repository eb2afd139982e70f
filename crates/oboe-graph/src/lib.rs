//! # Note Graph
//!
//! Relationships between the notes of a vault:
//!
//! - [`BacklinkEngine`] / [`BacklinkIndex`] - which notes link to which,
//!   rendered into an embeddable backlink block (petgraph based)
//! - [`TagFilter`] - include/exclude tag sets applied before backlinks
//! - [`SidebarTree`] - nested navigation derived from output paths
//!
//! ## Quick Start
//!
//! ```
//! use oboe_core::ExportConfig;
//! use oboe_graph::{BacklinkEngine, SidebarTree, TagFilter};
//! use oboe_parser::{MarkdownRenderer, Note};
//!
//! let config = ExportConfig::default();
//! let notes = vec![
//!     Note::from_content("./A.md", "Hello #project [[B]]", &config).unwrap(),
//!     Note::from_content("./B.md", "World", &config).unwrap(),
//! ];
//!
//! let mut notes = TagFilter::parse(&config.filter).apply(notes);
//! BacklinkEngine::from_config(&config).resolve(&mut notes, &MarkdownRenderer::new());
//!
//! assert!(notes[0].backlink_html().is_empty());
//! assert!(notes[1].backlink_html().contains("A</a>"));
//!
//! let sidebar = SidebarTree::build(&notes, &config.output_root_name());
//! assert!(sidebar.is_empty());
//! ```
//!
//! ## Performance Characteristics
//!
//! - Backlink graph construction: O(n + m) with an identifier index,
//!   n = notes, m = links
//! - Sidebar construction: O(n log n) for the title sort

pub mod backlinks;
pub mod filter;
pub mod sidebar;

pub use backlinks::{BacklinkEngine, BacklinkIndex};
pub use filter::{EXCLUDE_MARKER, TagFilter};
pub use sidebar::{SidebarEntry, SidebarTree};

pub mod prelude {
    pub use crate::backlinks::{BacklinkEngine, BacklinkIndex};
    pub use crate::filter::TagFilter;
    pub use crate::sidebar::{SidebarEntry, SidebarTree};
    pub use oboe_parser::prelude::*;
}
