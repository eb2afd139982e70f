//! Backlink resolution using petgraph.
//!
//! Nodes are the notes of the (filtered) collection, an edge `M -> N` means
//! note M links to note N's identifier. Backlinks of N are its incoming
//! neighbours. The graph is built from an immutable view of the notes and
//! the rendered fragments are attached in a separate pass.

use oboe_core::{ExportConfig, MarkdownRender};
use oboe_parser::Note;
use petgraph::prelude::*;
use std::collections::{HashMap, HashSet};

/// Opening of the backlink container; `markdown="1"` lets the entries render
const BACKLINKS_OPEN: &str = "\n<div class=\"backlinks\" markdown=\"1\">\n";
const BACKLINKS_CLOSE: &str = "</div>";

/// Directed link graph over a note collection
pub struct BacklinkIndex {
    /// Node weights are positions in the note slice
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
}

impl BacklinkIndex {
    /// Build the graph for `notes`.
    ///
    /// A link resolves to every note whose identifier equals it exactly.
    /// Self links are ignored and a note linking the same target several
    /// times produces one edge.
    pub fn build(notes: &[Note]) -> Self {
        let mut graph = DiGraph::with_capacity(notes.len(), notes.len());
        let nodes: Vec<NodeIndex> = (0..notes.len()).map(|i| graph.add_node(i)).collect();

        let mut by_identifier: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, note) in notes.iter().enumerate() {
            by_identifier.entry(note.identifier()).or_default().push(i);
        }

        for (source, note) in notes.iter().enumerate() {
            let mut seen = HashSet::new();
            for link in note.links() {
                if !seen.insert(link.as_str()) {
                    continue;
                }
                let Some(targets) = by_identifier.get(link.as_str()) else {
                    continue;
                };
                for &target in targets {
                    if target != source {
                        graph.add_edge(nodes[source], nodes[target], ());
                    }
                }
            }
        }

        Self { graph, nodes }
    }

    /// Positions of the notes linking to `notes[index]`, sorted by title
    /// (case-sensitive), then by source path.
    pub fn backlinks(&self, notes: &[Note], index: usize) -> Vec<usize> {
        let Some(&node) = self.nodes.get(index) else {
            return Vec::new();
        };

        let mut sources: Vec<usize> = self
            .graph
            .neighbors_directed(node, Incoming)
            .map(|n| self.graph[n])
            .collect();
        sources.sort_by(|&a, &b| {
            notes[a]
                .title()
                .cmp(notes[b].title())
                .then_with(|| notes[a].path().cmp(notes[b].path()))
        });
        sources
    }

    /// Number of notes
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved note-to-note links
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Computes backlinks for a whole collection and renders them
#[derive(Debug, Clone, Copy)]
pub struct BacklinkEngine {
    backlink_dash: bool,
}

impl BacklinkEngine {
    /// Create an engine; `backlink_dash` prefixes each entry with `- `
    pub fn new(backlink_dash: bool) -> Self {
        Self { backlink_dash }
    }

    /// Create an engine from the run configuration
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.backlink_dash)
    }

    /// Sorted backlink positions for every note
    pub fn compute(&self, notes: &[Note]) -> Vec<Vec<usize>> {
        let index = BacklinkIndex::build(notes);
        log::debug!(
            "Backlink graph: {} notes, {} links",
            index.node_count(),
            index.edge_count()
        );
        (0..notes.len()).map(|i| index.backlinks(notes, i)).collect()
    }

    /// Markdown source of the backlink block, `None` when there are no
    /// backlinks.
    pub fn backlink_markdown(&self, linking: &[&Note]) -> Option<String> {
        if linking.is_empty() {
            return None;
        }

        let mut markdown = String::from(BACKLINKS_OPEN);
        for note in linking {
            if self.backlink_dash {
                markdown.push_str("- ");
            }
            markdown.push_str(&note.md_link());
            markdown.push('\n');
        }
        markdown.push_str(BACKLINKS_CLOSE);
        Some(markdown)
    }

    /// Compute, render and attach backlinks for every note.
    ///
    /// Must run once, after filtering. Notes without backlinks keep an empty
    /// fragment.
    pub fn resolve(&self, notes: &mut [Note], renderer: &dyn MarkdownRender) {
        let rendered: Vec<Option<String>> = {
            let snapshot: &[Note] = notes;
            self.compute(snapshot)
                .iter()
                .map(|sources| {
                    let linking: Vec<&Note> = sources.iter().map(|&i| &snapshot[i]).collect();
                    self.backlink_markdown(&linking)
                        .map(|markdown| renderer.render(&markdown))
                })
                .collect()
        };

        let mut with_backlinks = 0;
        for (note, html) in notes.iter_mut().zip(rendered) {
            if let Some(html) = html {
                note.set_backlink_html(html);
                with_backlinks += 1;
            }
        }
        log::info!("Resolved backlinks for {} notes", with_backlinks);
    }
}
