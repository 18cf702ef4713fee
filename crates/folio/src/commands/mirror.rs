//! `folio mirror` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{Config, MirrorConfig};
use folio_mirror::{MirrorJob, MirrorOptions, Rewrite, TableConverter};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the mirror command.
#[derive(Args)]
pub(crate) struct MirrorArgs {
    /// Run only the named job (default: all configured jobs).
    #[arg(short, long)]
    job: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl MirrorArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let jobs: Vec<&MirrorConfig> = match &self.job {
            Some(name) => vec![config.mirror(name)?],
            None => config.mirrors.iter().collect(),
        };
        if jobs.is_empty() {
            return Err(CliError::Validation(
                "No [[mirror]] jobs configured".to_owned(),
            ));
        }

        for job_config in jobs {
            output.highlight(&format!(
                "{}: {} -> {}",
                job_config.name,
                job_config.source.display(),
                job_config.target.display()
            ));

            let converter = TableConverter::load_all(job_config.tables.as_slice())?;
            let report = to_job(job_config).run(&converter)?;

            output.success(&format!(
                "Mirrored {} document(s) ({} converted, {} passed through)",
                report.total(),
                report.converted.len(),
                report.passed_through.len()
            ));
        }

        Ok(())
    }
}

/// Turn a configured mirror job into a runnable one.
fn to_job(config: &MirrorConfig) -> MirrorJob {
    MirrorJob {
        source: config.source.clone(),
        target: config.target.clone(),
        documents: config.documents.clone(),
        options: MirrorOptions {
            marker: config.marker.clone(),
            protect_fences: config.protect_fences,
            rewrites: config
                .rewrites
                .iter()
                .map(|rule| Rewrite::new(rule.from.as_str(), rule.to.as_str()))
                .collect(),
        },
    }
}
