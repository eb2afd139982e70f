//! Oboe CLI

use anyhow::Context;
use clap::Parser;
use oboe_core::ExportConfig;
use std::path::PathBuf;

/// Convert an Obsidian vault to a static HTML site
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the Obsidian vault directory
    #[arg(env = "OBOE_VAULT")]
    vault: Option<PathBuf>,

    /// Output directory for the generated site
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template with {title}, {content}, {backlinks} and {sidebar}
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Folder (relative to the vault) to include; repeatable. Default: all
    #[arg(short = 'd', long = "dir")]
    dirs: Vec<PathBuf>,

    /// Tag filter; `tag` keeps only tagged notes, `.tag` drops them. Repeatable
    #[arg(short, long)]
    filter: Vec<String>,

    /// Do not prefix backlinks with a list bullet
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_backlink_dash: bool,

    /// Do not append the output extension to generated note links
    #[arg(long, action = clap::ArgAction::SetTrue)]
    no_html_links: bool,

    /// YAML configuration file; command-line flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => ExportConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ExportConfig::default(),
        };

        if let Some(vault) = self.vault {
            config.vault_root = vault;
        } else if self.config.is_none() {
            anyhow::bail!("No vault given; pass a vault path or a configuration file");
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(template) = self.template {
            config.template = Some(template);
        }
        if !self.dirs.is_empty() {
            config.extra_folders = self.dirs;
        }
        if !self.filter.is_empty() {
            config.filter = self.filter;
        }
        if self.no_backlink_dash {
            config.backlink_dash = false;
        }
        if self.no_html_links {
            config.html_link_extensions = false;
        }

        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    // RUST_LOG takes precedence over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    log::info!("Oboe v{}", env!("CARGO_PKG_VERSION"));

    let config = args.into_config()?;
    let output_dir = config.output_dir.clone();
    let summary = oboe::run(config).context("Export failed")?;

    println!(
        "Exported {} notes to {}",
        summary.notes_written,
        output_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "oboe",
            "vault",
            "-o",
            "site",
            "-d",
            "Notes",
            "-d",
            "Guides",
            "-f",
            "public",
            "-f",
            ".draft",
            "--no-backlink-dash",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.vault_root, PathBuf::from("vault"));
        assert_eq!(config.output_dir, PathBuf::from("site"));
        assert_eq!(
            config.extra_folders,
            vec![PathBuf::from("Notes"), PathBuf::from("Guides")]
        );
        assert_eq!(config.filter, vec!["public", ".draft"]);
        assert!(!config.backlink_dash);
        assert!(config.html_link_extensions);
    }

    #[test]
    fn test_verbosity_count() {
        let args = Args::parse_from(["oboe", "vault", "-vv"]);
        assert_eq!(args.verbose, 2);
    }
}
