//! Vault loading: template, folder discovery, note scan, filtering and
//! backlinks.

use oboe_core::prelude::*;
use oboe_graph::{BacklinkEngine, TagFilter};
use oboe_parser::{MarkdownRenderer, Note};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of note files
const NOTE_EXTENSION: &str = "md";

/// HTML template read at startup
#[derive(Debug, Clone)]
pub struct HtmlTemplate {
    path: PathBuf,
    source: String,
}

impl HtmlTemplate {
    /// Read the template at `path`.
    ///
    /// A missing file is reported as [`Error::TemplateNotFound`].
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let source = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::template_not_found(&path),
            _ => Error::io(e),
        })?;
        log::debug!("Using template: \"{}\"", path.display());
        Ok(Self { path, source })
    }

    /// Path the template was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that relative references in the template resolve against
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Template text
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A loaded vault: the retained notes with their backlinks attached.
#[derive(Debug)]
pub struct Vault {
    config: ExportConfig,
    template: Option<HtmlTemplate>,
    folders: Vec<PathBuf>,
    notes: Vec<Note>,
    renderer: MarkdownRenderer,
}

impl Vault {
    /// Load the vault described by `config`.
    ///
    /// The template is read before anything else so a missing template
    /// aborts the run without touching any note.
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;

        let template = config
            .template
            .as_ref()
            .map(HtmlTemplate::load)
            .transpose()?;

        let folders = resolve_folders(&config)?;
        let notes = scan_notes(&config, &folders)?;
        log::info!("Found {} notes!", notes.len());

        let mut notes = TagFilter::parse(&config.filter).apply(notes);
        check_output_paths(&notes)?;

        let renderer = MarkdownRenderer::new();
        BacklinkEngine::from_config(&config).resolve(&mut notes, &renderer);

        log::info!(
            "Created Vault object with root \"{}\"",
            config.vault_root.display()
        );

        Ok(Self {
            config,
            template,
            folders,
            notes,
            renderer,
        })
    }

    /// Run configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Template, when one was configured
    pub fn template(&self) -> Option<&HtmlTemplate> {
        self.template.as_ref()
    }

    /// Folders scanned besides the vault root
    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    /// Retained notes in scan order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Renderer used for note bodies and backlinks
    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }
}

/// Folders to scan besides the root: the configured list joined to the vault
/// root, or every non-hidden subdirectory when the list is empty.
fn resolve_folders(config: &ExportConfig) -> Result<Vec<PathBuf>> {
    let root = &config.vault_root;

    if config.extra_folders.is_empty() {
        log::debug!("Adding notes from all subdirectories recursively.");
        return discover_folders(config);
    }

    config
        .extra_folders
        .iter()
        .map(|folder| {
            if folder.is_absolute()
                || folder.components().any(|c| matches!(c, Component::ParentDir))
            {
                return Err(Error::config_error(format!(
                    "Folder is outside the vault root: {}",
                    folder.display()
                )));
            }

            let path = root.join(folder);
            if !path.is_dir() {
                return Err(Error::config_error(format!(
                    "Folder does not exist: {}",
                    path.display()
                )));
            }
            Ok(path)
        })
        .collect()
}

fn discover_folders(config: &ExportConfig) -> Result<Vec<PathBuf>> {
    let output_dir = fs::canonicalize(&config.output_dir).ok();

    let mut folders = Vec::new();
    let walker = WalkDir::new(&config.vault_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root itself is subject to the predicate too
            entry.depth() == 0
                || (entry.file_type().is_dir()
                    && !is_hidden(entry)
                    && !is_output_dir(entry, output_dir.as_deref()))
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::io(e.into()))?;
        folders.push(entry.into_path());
    }

    Ok(folders)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_output_dir(entry: &DirEntry, output_dir: Option<&Path>) -> bool {
    let Some(output_dir) = output_dir else {
        return false;
    };
    fs::canonicalize(entry.path()).is_ok_and(|path| path == output_dir)
}

/// Parse every note of the root and of each folder. A note reachable
/// through several folders is kept once.
fn scan_notes(config: &ExportConfig, folders: &[PathBuf]) -> Result<Vec<Note>> {
    let mut seen = HashSet::new();
    let mut notes = Vec::new();

    for dir in std::iter::once(&config.vault_root).chain(folders) {
        for path in note_files(dir)? {
            if !seen.insert(path.clone()) {
                continue;
            }
            notes.push(Note::parse(path, config)?);
        }
    }

    Ok(notes)
}

/// Fail when two retained notes would be written to the same page.
fn check_output_paths(notes: &[Note]) -> Result<()> {
    let mut claimed: HashMap<&Path, &Path> = HashMap::with_capacity(notes.len());
    for note in notes {
        if let Some(previous) = claimed.insert(note.out_path(), note.path()) {
            return Err(Error::config_error(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                note.path().display(),
                note.out_path().display()
            )));
        }
    }
    Ok(())
}

/// Note files directly inside `dir`, sorted by path
fn note_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::from_read(e, dir))? {
        let path = entry.map_err(Error::io)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == NOTE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(root: &Path) -> ExportConfig {
        ExportConfig {
            vault_root: root.to_path_buf(),
            output_dir: root.join("site"),
            ..Default::default()
        }
    }

    fn titles(vault: &Vault) -> Vec<&str> {
        vault.notes().iter().map(|n| n.title()).collect()
    }

    #[test]
    fn test_scans_root_and_all_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.md", "[[B]]");
        write(dir.path(), "B.md", "");
        write(dir.path(), "sub/C.md", "");
        write(dir.path(), "sub/deeper/D.md", "");
        write(dir.path(), "sub/readme.txt", "");
        write(dir.path(), ".obsidian/Hidden.md", "");

        let vault = Vault::new(config(dir.path())).unwrap();
        assert_eq!(titles(&vault), vec!["A", "B", "C", "D"]);
        assert_eq!(vault.folders().len(), 2);
    }

    #[test]
    fn test_output_dir_inside_vault_is_not_scanned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.md", "");
        write(dir.path(), "site/Old.md", "");

        let vault = Vault::new(config(dir.path())).unwrap();
        assert_eq!(titles(&vault), vec!["A"]);
    }

    #[test]
    fn test_explicit_folders_are_not_recursive() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.md", "");
        write(dir.path(), "notes/B.md", "");
        write(dir.path(), "notes/inner/C.md", "");
        write(dir.path(), "other/D.md", "");

        let mut config = config(dir.path());
        config.extra_folders = vec![PathBuf::from("notes"), PathBuf::from("notes")];

        let vault = Vault::new(config).unwrap();
        assert_eq!(titles(&vault), vec!["A", "B"]);
    }

    #[test]
    fn test_folder_outside_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path());
        config.extra_folders = vec![PathBuf::from("../elsewhere")];

        let err = Vault::new(config).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));
    }

    #[test]
    fn test_missing_template_is_reported_first() {
        let dir = TempDir::new().unwrap();
        let mut config = config(dir.path());
        config.template = Some(dir.path().join("missing.html"));
        config.extra_folders = vec![PathBuf::from("../elsewhere")];

        let err = Vault::new(config).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound { .. }));
    }

    #[test]
    fn test_template_is_loaded() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "theme/page.html", "<h1>{title}</h1>");

        let mut config = config(dir.path());
        config.template = Some(dir.path().join("theme/page.html"));

        let vault = Vault::new(config).unwrap();
        let template = vault.template().unwrap();
        assert_eq!(template.source(), "<h1>{title}</h1>");
        assert_eq!(template.base_dir(), dir.path().join("theme"));
    }

    #[test]
    fn test_output_path_clash_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "My Note.md", "FIRST");
        write(dir.path(), "my-note.md", "SECOND");

        let err = Vault::new(config(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ConfigError { .. }));

        let message = err.to_string();
        assert!(message.contains("My Note.md"));
        assert!(message.contains("my-note.md"));
        assert!(message.contains("my-note.html"));
    }

    #[test]
    fn test_filtered_note_does_not_clash() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "My Note.md", "Kept #public");
        write(dir.path(), "my-note.md", "Dropped");

        let mut config = config(dir.path());
        config.filter = vec!["public".to_string()];

        let vault = Vault::new(config).unwrap();
        assert_eq!(titles(&vault), vec!["My Note"]);
    }

    #[test]
    fn test_same_slug_in_different_folders_is_allowed() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/Note.md", "");
        write(dir.path(), "b/Note.md", "");

        let vault = Vault::new(config(dir.path())).unwrap();
        assert_eq!(vault.notes().len(), 2);
    }

    #[test]
    fn test_filter_runs_before_backlinks() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.md", "Secret #private [[B]]");
        write(dir.path(), "B.md", "World");
        write(dir.path(), "C.md", "Public [[B]]");

        let mut config = config(dir.path());
        config.filter = vec![".private".to_string()];

        let vault = Vault::new(config).unwrap();
        assert_eq!(titles(&vault), vec!["B", "C"]);

        let b = &vault.notes()[0];
        assert!(b.backlink_html().contains(">C</a>"));
        assert!(!b.backlink_html().contains(">A</a>"));
    }
}
