//! Regex layers for Obsidian-specific syntax

mod tags;
mod wikilinks;

pub use self::tags::extract_tags;
pub use self::wikilinks::{WikiLink, convert_wikilinks, extract_links};
