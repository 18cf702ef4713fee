//! Site declarations as authored in YAML.
//!
//! Declarations mirror the loosely-typed shape site authors write: a sidebar
//! entry is a leaf when it has no `items` and a section otherwise, links are
//! plain strings, and every locale field is optional. [`build`](crate::build)
//! validates declarations and lowers them into [`model`](crate::model) types.
//!
//! # Example
//!
//! ```yaml
//! title: Rust Notes
//! lang: zh-Hant
//! theme:
//!   nav:
//!     - text: Guide
//!       link: /docs/introduction
//!   sidebar:
//!     /docs/:
//!       - text: Basics
//!         items:
//!           - text: Variables
//!             link: /docs/variables
//! locales:
//!   - tag: zhs
//!     label: 简体中文
//!     link: /zhs/
//!     title: Rust 笔记
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::{
    DocFooter, Footer, HeadTag, MarkdownOptions, SearchUiStrings, SiteManifest, SocialLink,
};
use crate::validate::ValidationError;

/// Error reading or parsing a site declaration.
#[derive(Debug, thiserror::Error)]
pub enum DeclarationError {
    /// Declaration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML is malformed or does not match the declaration shape.
    #[error("Invalid site declaration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A complete declaration file: root fields plus locale overlays.
#[derive(Clone, Debug, Deserialize)]
pub struct SiteDeclaration {
    /// Root manifest fields.
    #[serde(flatten)]
    pub root: RootDeclaration,
    /// Locale overlays.
    #[serde(default)]
    pub locales: Vec<LocaleDeclaration>,
}

impl SiteDeclaration {
    /// Parse a declaration from YAML content.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Parse`] if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, DeclarationError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a declaration file.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Io`] if the file cannot be read, or
    /// [`DeclarationError::Parse`] if it is malformed.
    pub fn load(path: &Path) -> Result<Self, DeclarationError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeclarationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Validate and resolve this declaration.
    ///
    /// # Errors
    ///
    /// See [`build`](crate::build).
    pub fn build(&self) -> Result<SiteManifest, ValidationError> {
        crate::build(&self.root, &self.locales)
    }
}

/// Root manifest fields.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootDeclaration {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub markdown: MarkdownOptions,
    #[serde(default)]
    pub head: Vec<HeadTag>,
    #[serde(default)]
    pub theme: ThemeDeclaration,
}

fn default_lang() -> String {
    "en-US".to_owned()
}

fn default_base() -> String {
    "/".to_owned()
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}

/// Theme fields of the root declaration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemeDeclaration {
    pub logo: Option<String>,
    pub nav: Vec<NavItemDeclaration>,
    pub sidebar: SidebarDeclaration,
    pub social_links: Vec<SocialLink>,
    pub footer: Option<Footer>,
    pub outline_label: Option<String>,
    #[serde(alias = "darkModeSwitchLabel")]
    pub dark_mode_label: Option<String>,
    #[serde(alias = "lastUpdatedText")]
    pub last_updated_label: Option<String>,
    pub doc_footer: Option<DocFooter>,
    pub search: SearchUiStrings,
}

/// Navigation bar entry as declared.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItemDeclaration {
    #[serde(default, alias = "label")]
    pub text: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub items: Vec<NavItemDeclaration>,
}

/// Sidebar entry as declared.
///
/// An entry with `items` (even an empty list) is a section; one without is
/// a leaf link.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarEntryDeclaration {
    #[serde(default, alias = "label")]
    pub text: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub collapsed: Option<bool>,
    #[serde(default)]
    pub items: Option<Vec<SidebarEntryDeclaration>>,
}

/// Sidebar as declared: a single tree for the whole site, or trees keyed by
/// URL path prefix.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SidebarDeclaration {
    /// One tree shown on every page (registered under `/`).
    Single(Vec<SidebarEntryDeclaration>),
    /// Trees keyed by URL path prefix.
    ByPrefix(BTreeMap<String, Vec<SidebarEntryDeclaration>>),
}

impl Default for SidebarDeclaration {
    fn default() -> Self {
        Self::ByPrefix(BTreeMap::new())
    }
}

/// Locale overlay as declared. Absent fields inherit from the root.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct LocaleDeclaration {
    pub tag: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: ThemeOverlayDeclaration,
}

/// Theme overrides of a locale. Absent fields inherit from the root.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemeOverlayDeclaration {
    pub logo: Option<String>,
    pub nav: Option<Vec<NavItemDeclaration>>,
    pub sidebar: Option<SidebarDeclaration>,
    pub social_links: Option<Vec<SocialLink>>,
    pub footer: Option<Footer>,
    pub outline_label: Option<String>,
    #[serde(alias = "darkModeSwitchLabel")]
    pub dark_mode_label: Option<String>,
    #[serde(alias = "lastUpdatedText")]
    pub last_updated_label: Option<String>,
    pub doc_footer: Option<DocFooter>,
    pub search: Option<SearchUiStrings>,
}
