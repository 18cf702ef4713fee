//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod export;
pub(crate) mod mirror;

pub(crate) use check::CheckArgs;
pub(crate) use export::ExportArgs;
pub(crate) use mirror::MirrorArgs;

use folio_config::Config;
use folio_manifest::{SiteDeclaration, SiteManifest};

use crate::error::CliError;

/// Parse and build the site declaration named by the configuration.
fn load_manifest(config: &Config) -> Result<SiteManifest, CliError> {
    let declaration = SiteDeclaration::load(&config.site_resolved.manifest_path)?;
    Ok(declaration.build()?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_manifest_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("site.yaml");
        fs::write(
            &manifest_path,
            "title: Guide\nlocales:\n  - tag: zhs\n    label: 简体中文\n    link: /zhs/\n",
        )
        .unwrap();
        let mut config = Config::default();
        config.site_resolved.manifest_path = manifest_path;

        let manifest = load_manifest(&config).unwrap();

        assert_eq!(manifest.title, "Guide");
        assert_eq!(manifest.locales.len(), 1);
    }

    #[test]
    fn test_load_manifest_reports_validation_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manifest_path = temp_dir.path().join("site.yaml");
        fs::write(&manifest_path, "title: \"\"\n").unwrap();
        let mut config = Config::default();
        config.site_resolved.manifest_path = manifest_path;

        let err = load_manifest(&config).unwrap_err();

        assert!(matches!(err, CliError::Manifest(_)));
        assert!(err.to_string().starts_with("Invalid site declaration"));
    }
}
