//! Resolved site manifest types.
//!
//! These are the validated, immutable values produced by
//! [`build`](crate::build). Declarations parsed from YAML live in
//! [`declaration`](crate::declaration) and are lowered into these types.
//!
//! Serialization follows the shape the site framework reads: camelCase keys,
//! `text`/`link`/`items` for navigation entries.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::link::LinkTarget;

/// Fully resolved configuration of one documentation site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteManifest {
    /// Site title shown in the browser tab and the nav bar.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Default locale tag (e.g., `zh-Hant`).
    pub lang: String,
    /// Base URL path the site is served under.
    pub base: String,
    /// Build output directory.
    pub out_dir: PathBuf,
    /// Markdown processing options.
    pub markdown: MarkdownOptions,
    /// Extra tags injected into every page's `<head>`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
    /// Theme configuration.
    #[serde(rename = "themeConfig")]
    pub theme: ThemeConfig,
    /// Resolved locale variants.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locales: Vec<LocaleVariant>,
}

/// Markdown processing options passed through to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkdownOptions {
    /// Enabled markdown extensions (renderer plugin names).
    pub extensions: Vec<String>,
    /// Render `$...$` math.
    pub math: bool,
    /// Syntax-highlight theme names.
    pub theme: HighlightThemes,
}

/// Syntax-highlight theme names for light and dark mode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightThemes {
    pub light: String,
    pub dark: String,
}

impl Default for HighlightThemes {
    fn default() -> Self {
        Self {
            light: "github-light".to_owned(),
            dark: "github-dark".to_owned(),
        }
    }
}

/// A tag injected into `<head>`, e.g. a favicon link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadTag {
    /// Element name (`link`, `meta`, `script`).
    pub tag: String,
    /// Attributes, ordered by name.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content for elements like `script`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Theme configuration: navigation, sidebar and UI labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Logo path (served from the public directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Navigation bar entries.
    pub nav: Vec<NavItem>,
    /// Sidebar trees keyed by URL path prefix.
    pub sidebar: SidebarMap,
    /// Social links shown in the nav bar.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub social_links: Vec<SocialLink>,
    /// Footer text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Heading of the on-page outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_label: Option<String>,
    /// Label of the dark-mode switch.
    #[serde(rename = "darkModeSwitchLabel", skip_serializing_if = "Option::is_none")]
    pub dark_mode_label: Option<String>,
    /// Label shown before the last-updated timestamp.
    #[serde(rename = "lastUpdatedText", skip_serializing_if = "Option::is_none")]
    pub last_updated_label: Option<String>,
    /// Previous/next page labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_footer: Option<DocFooter>,
    /// Search widget labels.
    #[serde(skip_serializing_if = "SearchUiStrings::is_empty")]
    pub search: SearchUiStrings,
}

/// Navigation bar entry.
///
/// One level of nesting is used by the nav bar (dropdown menus).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display label.
    #[serde(rename = "text")]
    pub label: String,
    /// Link target. `None` for dropdown headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
    /// Dropdown entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

/// Sidebar entry: a leaf link or a nested section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarEntry {
    /// Leaf link.
    Item(NavItem),
    /// Group of entries, optionally with its own label and link.
    Section(SidebarSection),
}

impl SidebarEntry {
    /// Display label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Item(item) => Some(item.label.as_str()),
            Self::Section(section) => section.label.as_deref(),
        }
    }

    /// Link target, if any.
    #[must_use]
    pub fn link(&self) -> Option<&LinkTarget> {
        match self {
            Self::Item(item) => item.link.as_ref(),
            Self::Section(section) => section.link.as_ref(),
        }
    }
}

/// Group of sidebar entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Section heading.
    #[serde(rename = "text", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Link of the section heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkTarget>,
    /// Initial collapse state. `None` means not collapsible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Child entries.
    pub items: Vec<SidebarEntry>,
}

/// Sidebar trees keyed by URL path prefix.
///
/// A request path selects the tree registered under its longest matching
/// prefix; see [`SidebarMap::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SidebarMap(pub(crate) BTreeMap<String, Vec<SidebarEntry>>);

impl SidebarMap {
    /// Create a sidebar map from prefix/tree pairs.
    #[must_use]
    pub fn new(entries: BTreeMap<String, Vec<SidebarEntry>>) -> Self {
        Self(entries)
    }

    /// Tree registered under an exact prefix.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&[SidebarEntry]> {
        self.0.get(prefix).map(Vec::as_slice)
    }

    /// Iterate over prefixes and their trees in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarEntry])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of registered prefixes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no prefix is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Social link in the nav bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Icon name (e.g., `github`).
    pub icon: String,
    /// Target URL.
    pub link: String,
}

/// Footer text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Previous/next page link labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocFooter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Fixed label keys of the search widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchLabel {
    ButtonText,
    ButtonAriaLabel,
    ResetButtonTitle,
    BackButtonTitle,
    NoResultsText,
    DisplayDetails,
    SelectText,
    NavigateText,
    CloseText,
}

/// Search widget labels, merged per key across locales.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchUiStrings(BTreeMap<SearchLabel, String>);

impl SearchUiStrings {
    /// Create from label/text pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (SearchLabel, String)>) -> Self {
        Self(pairs.into_iter().collect())
    }

    /// Display string for a label key.
    #[must_use]
    pub fn get(&self, label: SearchLabel) -> Option<&str> {
        self.0.get(&label).map(String::as_str)
    }

    /// Check whether no label is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`: keys present in `other` win.
    #[must_use]
    pub fn overlay(&self, other: &Self) -> Self {
        let mut merged = self.0.clone();
        for (label, text) in &other.0 {
            merged.insert(*label, text.clone());
        }
        Self(merged)
    }
}

/// A resolved locale: its identity plus a complete manifest view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleVariant {
    /// Locale tag (e.g., `zhs`).
    pub tag: String,
    /// Label in the language switcher.
    pub label: String,
    /// Locale root path (e.g., `/zhs/`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Manifest with locale overrides applied and root values inherited.
    #[serde(flatten)]
    pub manifest: SiteManifest,
}

impl SiteManifest {
    /// Resolved manifest for a locale tag.
    ///
    /// Declared locales are searched first; the root manifest is returned
    /// when `tag` equals its default locale.
    #[must_use]
    pub fn locale(&self, tag: &str) -> Option<&SiteManifest> {
        self.locales
            .iter()
            .find(|locale| locale.tag == tag)
            .map(|locale| &locale.manifest)
            .or_else(|| (self.lang == tag).then_some(self))
    }

    /// Manifest serving a request path.
    ///
    /// Picks the locale whose link is the longest prefix of `path`, falling
    /// back to the root manifest.
    #[must_use]
    pub fn locale_for_path(&self, path: &str) -> &SiteManifest {
        self.locales
            .iter()
            .filter_map(|locale| {
                let link = locale.link.as_deref()?;
                crate::sidebar::prefix_len(link, path).map(|len| (len, &locale.manifest))
            })
            .max_by_key(|(len, _)| *len)
            .map_or(self, |(_, manifest)| manifest)
    }

    /// Render the manifest as pretty-printed JSON for the site framework.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
