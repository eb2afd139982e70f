//! Sidebar navigation derived from the output path hierarchy.
//!
//! Every note is placed under the sections named by the directories of its
//! output path. Notes directly in the output root get no entry.

use oboe_core::utils::{escape_html, to_url_path};
use oboe_parser::Note;

/// One named slot of the sidebar
#[derive(Debug)]
pub enum SidebarEntry<'a> {
    /// A note, shown under its title
    Leaf(&'a Note),
    /// A directory with its own entries
    Section { name: String, children: SidebarTree<'a> },
}

impl SidebarEntry<'_> {
    /// Name shown in the sidebar
    pub fn name(&self) -> &str {
        match self {
            SidebarEntry::Leaf(note) => note.title(),
            SidebarEntry::Section { name, .. } => name,
        }
    }
}

/// Ordered mapping of names to sidebar entries
#[derive(Debug, Default)]
pub struct SidebarTree<'a> {
    entries: Vec<SidebarEntry<'a>>,
}

impl<'a> SidebarTree<'a> {
    /// Build the sidebar for `notes`.
    ///
    /// Notes are visited in title order. The path of each note is
    /// `root_name` followed by its output path relative to the output root;
    /// paths of two or fewer segments are skipped. The common root section is
    /// unwrapped, so the returned tree starts at its children.
    pub fn build(notes: &'a [Note], root_name: &str) -> Self {
        let mut sorted: Vec<&'a Note> = notes.iter().collect();
        sorted.sort_by(|a, b| a.title().cmp(b.title()));

        let mut tree = SidebarTree::default();
        for note in sorted {
            let segments = sidebar_segments(note, root_name);
            if segments.len() <= 2 {
                continue;
            }
            tree.insert(&segments[..segments.len() - 1], note);
        }

        tree.unwrap_root()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[SidebarEntry<'a>] {
        &self.entries
    }

    /// Whether the tree has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, sections: &[String], note: &'a Note) {
        let Some((first, rest)) = sections.split_first() else {
            self.insert_leaf(note);
            return;
        };

        if let Some(SidebarEntry::Section { children, .. }) = self
            .entries
            .iter_mut()
            .find(|e| matches!(e, SidebarEntry::Section { name, .. } if name == first))
        {
            children.insert(rest, note);
            return;
        }

        let mut children = SidebarTree::default();
        children.insert(rest, note);
        self.entries.push(SidebarEntry::Section {
            name: first.clone(),
            children,
        });
    }

    fn insert_leaf(&mut self, note: &'a Note) {
        let existing = self
            .entries
            .iter_mut()
            .find(|e| matches!(e, SidebarEntry::Leaf(other) if other.title() == note.title()));
        match existing {
            Some(entry) => *entry = SidebarEntry::Leaf(note),
            None => self.entries.push(SidebarEntry::Leaf(note)),
        }
    }

    /// Drop the single top-level section. Several roots are kept side by side.
    fn unwrap_root(mut self) -> Self {
        let single_section = self.entries.len() == 1
            && matches!(self.entries[0], SidebarEntry::Section { .. });
        if single_section && let Some(SidebarEntry::Section { children, .. }) = self.entries.pop()
        {
            return children;
        }
        self
    }

    /// Render the tree as nested navigation lists.
    pub fn render(&self) -> String {
        let mut html = String::from("<div class=sidebar>\n<ul class=\"chapter\">");
        for entry in &self.entries {
            render_entry(&mut html, entry, "<li class=\"no-bullet\">");
        }
        html.push_str("\n</ul>\n</div>");
        html
    }
}

fn render_entry(html: &mut String, entry: &SidebarEntry<'_>, section_item: &str) {
    html.push_str("\n<li class=\"chapter-item\">");
    match entry {
        SidebarEntry::Leaf(note) => {
            html.push_str(&format!(
                "\n<a href=\"/{}\" tabindex=\"0\">{}</a>\n</li>",
                escape_html(&to_url_path(note.relative_out_path())),
                escape_html(note.title())
            ));
        }
        SidebarEntry::Section { name, children } => {
            html.push_str(&format!("\n<div>{}</div>\n</li>", escape_html(name)));
            html.push('\n');
            html.push_str(section_item);
            render_section(html, children);
            html.push_str("\n</li>");
        }
    }
}

fn render_section(html: &mut String, section: &SidebarTree<'_>) {
    html.push_str("<ul class=\"section\">");
    for entry in &section.entries {
        render_entry(html, entry, "<li>");
    }
    html.push_str("\n</ul>");
}

/// `root_name` followed by the components of the note's relative output path
fn sidebar_segments(note: &Note, root_name: &str) -> Vec<String> {
    std::iter::once(root_name.to_string())
        .chain(
            note.relative_out_path()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oboe_core::ExportConfig;
    use std::path::PathBuf;

    fn note(path: &str) -> Note {
        let config = ExportConfig {
            vault_root: PathBuf::from("vault"),
            output_dir: PathBuf::from("output"),
            ..Default::default()
        };
        Note::from_content(format!("vault/{}", path), "", &config).unwrap()
    }

    #[test]
    fn test_root_notes_have_no_entry() {
        let notes = vec![note("A.md"), note("B.md")];
        let tree = SidebarTree::build(&notes, "output");
        assert!(tree.is_empty());
        assert_eq!(tree.render(), "<div class=sidebar>\n<ul class=\"chapter\">\n</ul>\n</div>");
    }

    #[test]
    fn test_one_level_per_intermediate_segment() {
        let notes = vec![note("A.md"), note("Guides/Setup.md"), note("Guides/Deep/Inner.md")];
        let tree = SidebarTree::build(&notes, "output");

        assert_eq!(tree.entries().len(), 1);
        let SidebarEntry::Section { name, children } = &tree.entries()[0] else {
            panic!("expected a section");
        };
        assert_eq!(name, "Guides");

        let names: Vec<&str> = children.entries().iter().map(|e| e.name()).collect();
        // "Inner" sorts before "Setup", so its section is created first
        assert_eq!(names, vec!["Deep", "Setup"]);

        let SidebarEntry::Section { children: deep, .. } = &children.entries()[0] else {
            panic!("expected a section");
        };
        assert!(matches!(deep.entries()[0], SidebarEntry::Leaf(n) if n.title() == "Inner"));
    }

    #[test]
    fn test_sections_follow_title_order() {
        let notes = vec![note("Zeta/A.md"), note("Alpha/B.md")];
        let tree = SidebarTree::build(&notes, "output");
        let names: Vec<&str> = tree.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_render_nested_markup() {
        let notes = vec![note("Docs/Intro.md"), note("Docs/More/Deep Dive.md")];
        let html = SidebarTree::build(&notes, "output").render();

        // "Deep Dive" sorts before "Intro", so "More" is created first
        let expected = concat!(
            "<div class=sidebar>\n<ul class=\"chapter\">",
            "\n<li class=\"chapter-item\">\n<div>Docs</div>\n</li>",
            "\n<li class=\"no-bullet\"><ul class=\"section\">",
            "\n<li class=\"chapter-item\">\n<div>More</div>\n</li>",
            "\n<li><ul class=\"section\">",
            "\n<li class=\"chapter-item\">\n<a href=\"/Docs/More/deep-dive.html\" tabindex=\"0\">Deep Dive</a>\n</li>",
            "\n</ul>\n</li>",
            "\n<li class=\"chapter-item\">\n<a href=\"/Docs/intro.html\" tabindex=\"0\">Intro</a>\n</li>",
            "\n</ul>\n</li>",
            "\n</ul>\n</div>",
        );
        assert_eq!(html, expected);
    }

    #[test]
    fn test_leaf_and_section_with_same_name_coexist() {
        let notes = vec![note("Docs/Topic.md"), note("Docs/Topic/Child.md")];
        let tree = SidebarTree::build(&notes, "output");
        let SidebarEntry::Section { children, .. } = &tree.entries()[0] else {
            panic!("expected a section");
        };
        assert_eq!(children.entries().len(), 2);
    }
}
