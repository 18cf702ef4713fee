//! `folio export` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::Term;
use folio_config::{CliSettings, Config};

use super::load_manifest;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Output file for the manifest JSON (default: .folio/manifest.json).
    #[arg(short, long, conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the manifest JSON to stdout instead of a file.
    #[arg(long)]
    stdout: bool,

    /// Site declaration file (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ExportArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            manifest: self.manifest,
            export_output: self.output,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let manifest = load_manifest(&config)?;
        let json = manifest.to_json()?;

        if self.stdout {
            Term::stdout().write_line(&json)?;
            return Ok(());
        }

        let path = &config.export_resolved.output;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, format!("{json}\n"))?;

        output.success(&format!("Manifest written to {}", path.display()));
        Ok(())
    }
}
