//! Configuration types for an export run.
//!
//! Follows a builder pattern for complex configuration with validation.
//! One [`ExportConfig`] is created per run and handed to the vault and to
//! every note; nothing is stored in process-wide state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default extension of rendered notes
pub const DEFAULT_OUTPUT_EXTENSION: &str = "html";

/// Configuration for a single export run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Path to the vault directory
    pub vault_root: PathBuf,
    /// Root of the generated site
    pub output_dir: PathBuf,
    /// Folders (relative to the vault root) whose notes are included besides
    /// the root. Empty means every subdirectory, discovered recursively.
    pub extra_folders: Vec<PathBuf>,
    /// Optional HTML template with `{title}`, `{content}`, `{backlinks}` and
    /// `{sidebar}` placeholders
    pub template: Option<PathBuf>,
    /// Tag filter; entries prefixed with `.` exclude, others include
    pub filter: Vec<String>,
    /// Prefix each backlink with a list bullet
    pub backlink_dash: bool,
    /// Append the output extension to generated note links
    pub html_link_extensions: bool,
    /// Extension of rendered notes (without the dot)
    pub output_extension: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            vault_root: PathBuf::from("."),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extra_folders: vec![],
            template: None,
            filter: vec![],
            backlink_dash: true,
            html_link_extensions: true,
            output_extension: DEFAULT_OUTPUT_EXTENSION.to_string(),
        }
    }
}

impl ExportConfig {
    /// Create a new export config with builder
    pub fn builder(vault_root: impl Into<PathBuf>) -> ExportConfigBuilder {
        ExportConfigBuilder::new(vault_root)
    }

    /// Validate the export configuration
    pub fn validate(&self) -> Result<()> {
        if !self.vault_root.exists() {
            return Err(Error::config_error(format!(
                "Vault path does not exist: {}",
                self.vault_root.display()
            )));
        }

        if !self.vault_root.is_dir() {
            return Err(Error::config_error(format!(
                "Vault path is not a directory: {}",
                self.vault_root.display()
            )));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config_error("Output directory cannot be empty"));
        }

        if self.output_extension.is_empty() || self.output_extension.starts_with('.') {
            return Err(Error::config_error(format!(
                "Output extension must be non-empty and given without a dot: {:?}",
                self.output_extension
            )));
        }

        for folder in &self.extra_folders {
            if folder.is_absolute() {
                return Err(Error::config_error(format!(
                    "Extra folder must be relative to the vault root: {}",
                    folder.display()
                )));
            }
        }

        Ok(())
    }

    /// Load an export configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config_error(format!(
                "Failed to load configuration from {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse an export configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::config_error(format!("Invalid export configuration: {}", e)))
    }

    /// Name of the output root as it appears as the first sidebar segment
    pub fn output_root_name(&self) -> String {
        self.output_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.output_dir.to_string_lossy().into_owned())
    }
}

/// Builder for ExportConfig
pub struct ExportConfigBuilder {
    config: ExportConfig,
}

impl ExportConfigBuilder {
    /// Create a new builder
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            config: ExportConfig {
                vault_root: vault_root.into(),
                ..ExportConfig::default()
            },
        }
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Add an extra folder to include
    pub fn extra_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.config.extra_folders.push(folder.into());
        self
    }

    /// Set the HTML template
    pub fn template(mut self, template: impl Into<PathBuf>) -> Self {
        self.config.template = Some(template.into());
        self
    }

    /// Add a filter entry (`tag` to include, `.tag` to exclude)
    pub fn filter(mut self, entry: impl Into<String>) -> Self {
        self.config.filter.push(entry.into());
        self
    }

    /// Set backlink_dash
    pub fn backlink_dash(mut self, dash: bool) -> Self {
        self.config.backlink_dash = dash;
        self
    }

    /// Set html_link_extensions
    pub fn html_link_extensions(mut self, enabled: bool) -> Self {
        self.config.html_link_extensions = enabled;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<ExportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
