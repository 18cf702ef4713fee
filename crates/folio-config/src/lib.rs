//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! [site]
//! manifest = "site.yaml"
//!
//! [docs]
//! source_dir = "src"
//!
//! [[mirror]]
//! name = "zhs"
//! source = "src/zht"
//! target = "src/zhs"
//! table = ["dict/TSPhrases.txt", "dict/TSCharacters.txt"]
//! documents = ["index.md", "docs/introduction.md"]
//!
//! [[mirror.rewrite]]
//! from = "/zht/"
//! to = "/zhs/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.manifest`
//! - `docs.source_dir`
//! - `export.output`
//! - `mirror.source`, `mirror.target`, `mirror.table`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site declaration file.
    pub manifest: Option<PathBuf>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override link checking.
    pub check_links: Option<bool>,
    /// Override the manifest export path.
    pub export_output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Marker used by mirror jobs when none is configured.
pub const DEFAULT_MIRROR_MARKER: &str = "<!-- do not translate -->";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    site: SiteConfigRaw,
    docs: DocsConfigRaw,
    export: ExportConfigRaw,
    #[serde(rename = "mirror")]
    mirror_raw: Vec<MirrorConfigRaw>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved export configuration (set after loading).
    #[serde(skip)]
    pub export_resolved: ExportConfig,
    /// Resolved mirror jobs (set after loading).
    #[serde(skip)]
    pub mirrors: Vec<MirrorConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    manifest: Option<String>,
}

/// Resolved site configuration.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site declaration file (YAML).
    pub manifest_path: PathBuf,
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    check_links: Option<bool>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
    /// Project directory for Folio data (.folio/). Exports land here
    /// unless `export.output` is set.
    pub project_dir: PathBuf,
    /// Whether `folio check` verifies internal links against the source
    /// directory.
    pub check_links: bool,
}

/// Raw export configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ExportConfigRaw {
    output: Option<String>,
}

/// Resolved export configuration.
#[derive(Debug, Default)]
pub struct ExportConfig {
    /// Destination of the resolved manifest JSON.
    pub output: PathBuf,
}

/// Raw mirror job as parsed from TOML.
#[derive(Debug, Deserialize)]
struct MirrorConfigRaw {
    name: Option<String>,
    source: String,
    target: String,
    #[serde(default, rename = "table", alias = "tables", deserialize_with = "one_or_many")]
    tables: Vec<String>,
    #[serde(default)]
    documents: Vec<String>,
    marker: Option<String>,
    protect_fences: Option<bool>,
    #[serde(default)]
    rewrite: Vec<RewriteRule>,
}

/// Accept either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Literal link rewrite applied to mirrored documents.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RewriteRule {
    /// Text to replace.
    pub from: String,
    /// Replacement.
    pub to: String,
}

/// Resolved mirror job with absolute paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MirrorConfig {
    /// Job name (defaults to the target path as written).
    pub name: String,
    /// Directory holding the source locale's documents.
    pub source: PathBuf,
    /// Directory receiving the derived documents.
    pub target: PathBuf,
    /// Conversion tables, merged in order (e.g., phrases then characters).
    /// Empty copies prose unchanged.
    pub tables: Vec<PathBuf>,
    /// Document paths relative to `source`.
    pub documents: Vec<String>,
    /// Marker bounding regions that must not be converted.
    pub marker: String,
    /// Copy fenced code blocks verbatim.
    pub protect_fences: bool,
    /// Link rewrites, applied in order.
    pub rewrites: Vec<RewriteRule>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a document path to stay inside its source directory.
fn require_relative_document(path: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(path, field)?;
    if Path::new(path).is_absolute() || path.split(['/', '\\']).any(|s| s == "..") {
        return Err(ConfigError::Validation(format!(
            "{field} must be a relative path inside the source directory, got {path:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Look up a mirror job by name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if no job has that name.
    pub fn mirror(&self, name: &str) -> Result<&MirrorConfig, ConfigError> {
        self.mirrors
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| ConfigError::Validation(format!("no [[mirror]] job named {name:?}")))
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(manifest) = &settings.manifest {
            self.site_resolved.manifest_path.clone_from(manifest);
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(check_links) = settings.check_links {
            self.docs_resolved.check_links = check_links;
        }
        if let Some(output) = &settings.export_output {
            self.export_resolved.output.clone_from(output);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let project_dir = base.join(".folio");
        Self {
            site: SiteConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            export: ExportConfigRaw::default(),
            mirror_raw: Vec::new(),
            site_resolved: SiteConfig {
                manifest_path: base.join("site.yaml"),
            },
            export_resolved: ExportConfig {
                output: project_dir.join("manifest.json"),
            },
            docs_resolved: DocsConfig {
                source_dir: base.join("src"),
                project_dir,
                check_links: true,
            },
            mirrors: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for (i, mirror) in self.mirrors.iter().enumerate() {
            let field = format!("mirror[{i}]");
            if !names.insert(mirror.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{field}: duplicate mirror name {:?}",
                    mirror.name
                )));
            }
            if mirror.source == mirror.target {
                return Err(ConfigError::Validation(format!(
                    "{field}: source and target must differ"
                )));
            }
            if mirror.documents.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{field}.documents cannot be empty"
                )));
            }
            for document in &mirror.documents {
                require_relative_document(document, &format!("{field}.documents"))?;
            }
            require_non_empty(&mirror.marker, &format!("{field}.marker"))?;
            for rule in &mirror.rewrites {
                require_non_empty(&rule.from, &format!("{field}.rewrite.from"))?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.manifest, "site.manifest")?;
        expand::expand_opt(&mut self.docs.source_dir, "docs.source_dir")?;
        expand::expand_opt(&mut self.export.output, "export.output")?;

        for mirror in &mut self.mirror_raw {
            mirror.source = expand::expand_env(&mirror.source, "mirror.source")?;
            mirror.target = expand::expand_env(&mirror.target, "mirror.target")?;
            for table in &mut mirror.tables {
                *table = expand::expand_env(table, "mirror.table")?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            manifest_path: resolve(self.site.manifest.as_deref(), "site.yaml"),
        };
        let project_dir = config_dir.join(".folio");
        self.export_resolved = ExportConfig {
            output: self
                .export
                .output
                .as_deref()
                .map_or_else(|| project_dir.join("manifest.json"), |o| config_dir.join(o)),
        };
        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "src"),
            project_dir,
            check_links: self.docs.check_links.unwrap_or(true),
        };
        self.mirrors = self
            .mirror_raw
            .iter()
            .map(|raw| MirrorConfig {
                name: raw.name.clone().unwrap_or_else(|| raw.target.clone()),
                source: config_dir.join(&raw.source),
                target: config_dir.join(&raw.target),
                tables: raw.tables.iter().map(|t| config_dir.join(t)).collect(),
                documents: raw.documents.clone(),
                marker: raw
                    .marker
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MIRROR_MARKER.to_owned()),
                protect_fences: raw.protect_fences.unwrap_or(false),
                rewrites: raw.rewrite.clone(),
            })
            .collect();
    }
}
