//! `folio check` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_manifest::{FsContentTree, check_links, lint};

use super::load_manifest;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Site declaration file (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Skip checking internal links against the source directory.
    #[arg(long)]
    no_links: bool,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            manifest: self.manifest,
            source_dir: self.source_dir,
            check_links: self.no_links.then_some(false),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Declaration: {}",
            config.site_resolved.manifest_path.display()
        ));
        let manifest = load_manifest(&config)?;

        let diagnostics = lint(&manifest);
        for diagnostic in &diagnostics {
            output.warning(&format!("warning: {diagnostic}"));
        }

        if config.docs_resolved.check_links {
            let source_dir = &config.docs_resolved.source_dir;
            output.info(&format!("Source: {}", source_dir.display()));

            let dangling = check_links(&manifest, &FsContentTree::new(source_dir.clone()));
            for link in &dangling {
                output.error(&format!(
                    "{}: no document for {}",
                    link.location, link.link
                ));
            }
            if !dangling.is_empty() {
                return Err(CliError::Validation(format!(
                    "{} dangling link(s) under {}",
                    dangling.len(),
                    source_dir.display()
                )));
            }
        }

        output.success(&format!(
            "Site manifest is valid ({} locale(s), {} warning(s))",
            manifest.locales.len(),
            diagnostics.len()
        ));
        Ok(())
    }
}
