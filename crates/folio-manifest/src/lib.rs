//! Site manifest model for Folio documentation sites.
//!
//! This crate provides:
//! - [`SiteDeclaration`]: the YAML shape site authors write
//! - [`build`]: validation and locale resolution into a [`SiteManifest`]
//! - [`resolve_sidebar_for`]: longest-prefix sidebar selection
//! - [`merge_locale_overlay`]: field-by-field locale overlays
//! - [`lint`] and [`check_links`]: non-fatal checks against duplicates and
//!   missing documents
//!
//! The manifest is built once per site build and is immutable afterwards.
//! Rendering, theming and search indexing belong to the site framework that
//! reads the manifest (see [`SiteManifest::to_json`]).
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_manifest::{SiteDeclaration, resolve_sidebar_for};
//!
//! let decl = SiteDeclaration::from_yaml(
//!     r"
//! title: Rust Notes
//! theme:
//!   sidebar:
//!     /docs/:
//!       - text: Types
//!         link: /docs/types
//! ",
//! )?;
//! let manifest = decl.build()?;
//!
//! assert_eq!(resolve_sidebar_for("/docs/basic/types", &manifest).len(), 1);
//! assert!(resolve_sidebar_for("/blog", &manifest).is_empty());
//! # Ok(())
//! # }
//! ```

mod content;
pub mod declaration;
mod link;
mod lint;
pub mod model;
mod overlay;
mod sidebar;
mod validate;
mod visit;

use std::collections::HashSet;

pub use content::{ContentTree, DanglingLink, FsContentTree, check_links};
pub use declaration::{DeclarationError, LocaleDeclaration, RootDeclaration, SiteDeclaration};
pub use link::LinkTarget;
pub use lint::{Diagnostic, lint};
pub use model::{
    LocaleVariant, NavItem, SearchLabel, SearchUiStrings, SidebarEntry, SidebarMap,
    SidebarSection, SiteManifest, ThemeConfig,
};
pub use overlay::{LocaleOverlay, ThemeOverlay, merge_locale_overlay};
pub use sidebar::resolve_sidebar_for;
pub use validate::ValidationError;

/// Validate declarations and resolve every locale against the root.
///
/// Returns a manifest whose locale variants carry fully resolved values:
/// fields a locale declares override the root, all others are inherited.
/// Duplicate sibling entries are logged as warnings (see [`lint`]).
///
/// # Errors
///
/// Returns [`ValidationError`] when:
/// - the title or a present label is empty, at any nesting depth
/// - a link is neither an absolute path nor an http(s)/mailto URL
/// - a sidebar prefix maps to zero entries
/// - a locale tag is empty or declared more than once
pub fn build(
    root: &RootDeclaration,
    locales: &[LocaleDeclaration],
) -> Result<SiteManifest, ValidationError> {
    let mut tags = HashSet::new();
    for locale in locales {
        if !locale.tag.is_empty() && !tags.insert(locale.tag.as_str()) {
            return Err(ValidationError::DuplicateLocale(locale.tag.clone()));
        }
    }

    let mut manifest = validate::lower_root(root)?;
    let overlays = locales
        .iter()
        .enumerate()
        .map(|(index, locale)| validate::lower_locale(index, locale))
        .collect::<Result<Vec<_>, _>>()?;

    let variants = overlays
        .iter()
        .map(|overlay| {
            tracing::debug!(tag = %overlay.tag, "Resolving locale");
            LocaleVariant {
                tag: overlay.tag.clone(),
                label: overlay.label.clone(),
                link: overlay.link.clone(),
                manifest: merge_locale_overlay(&manifest, overlay),
            }
        })
        .collect();
    manifest.locales = variants;

    for diagnostic in lint(&manifest) {
        tracing::warn!("{diagnostic}");
    }

    Ok(manifest)
}
