//! Tag based inclusion/exclusion of notes.

use oboe_parser::Note;
use std::collections::BTreeSet;

/// Prefix marking a filter entry as an exclusion
pub const EXCLUDE_MARKER: char = '.';

/// Include/exclude tag sets parsed from a filter specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
}

impl TagFilter {
    /// Split a filter specification: `.tag` excludes, `tag` includes.
    /// Entries are taken verbatim, so whitespace is part of the tag.
    ///
    /// ```
    /// use oboe_graph::TagFilter;
    ///
    /// let filter = TagFilter::parse(["public", ".draft"]);
    /// assert!(filter.include().contains("public"));
    /// assert!(filter.exclude().contains("draft"));
    /// ```
    pub fn parse<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.strip_prefix(EXCLUDE_MARKER) {
                Some(tag) if !tag.is_empty() => {
                    filter.exclude.insert(tag.to_string());
                }
                Some(_) => {}
                None if !entry.is_empty() => {
                    filter.include.insert(entry.to_string());
                }
                None => {}
            }
        }
        filter
    }

    /// Tags of which a note needs at least one (when non-empty)
    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    /// Tags that drop a note
    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    /// Whether the filter retains everything
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether a note with `tags` survives the filter. Exclusion wins.
    pub fn retains(&self, tags: &[String]) -> bool {
        if tags.iter().any(|tag| self.exclude.contains(tag)) {
            return false;
        }
        self.include.is_empty() || tags.iter().any(|tag| self.include.contains(tag))
    }

    /// Drop the notes that do not survive, preserving order.
    pub fn apply(&self, notes: Vec<Note>) -> Vec<Note> {
        if self.is_empty() {
            return notes;
        }

        let before = notes.len();
        let retained: Vec<Note> = notes
            .into_iter()
            .filter(|note| self.retains(note.tags()))
            .collect();

        if !self.exclude.is_empty() {
            log::info!("Filtered out notes containing tags: {:?}", self.exclude);
        }
        if !self.include.is_empty() {
            log::info!("Filtered out notes NOT containing tags: {:?}", self.include);
        }
        log::info!("Kept {} of {} notes", retained.len(), before);

        retained
    }
}
