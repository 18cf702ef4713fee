//! Declaration validation and lowering into manifest types.
//!
//! Every check reports the location of the offending entry as a path
//! expression, e.g. `locales["zhs"].theme.sidebar["/docs/"][1].items[0]`.

use std::collections::BTreeMap;

use crate::declaration::{
    LocaleDeclaration, NavItemDeclaration, RootDeclaration, SidebarDeclaration,
    SidebarEntryDeclaration, ThemeDeclaration, ThemeOverlayDeclaration,
};
use crate::link::LinkTarget;
use crate::model::{NavItem, SidebarEntry, SidebarMap, SidebarSection, SiteManifest, ThemeConfig};
use crate::overlay::{LocaleOverlay, ThemeOverlay};
use crate::sidebar::normalize_prefix;

/// Malformed manifest declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Field path (e.g., `title`).
        field: String,
    },
    /// A nav item or labelled sidebar entry has an empty label.
    #[error("{location}: label cannot be empty")]
    EmptyLabel { location: String },
    /// A nav item or sidebar leaf has neither a link nor children.
    #[error("{location}: entry needs a link or child items")]
    MissingTarget { location: String },
    /// A link is neither an absolute path nor a supported URL.
    #[error("{location}: invalid link {link:?}: {reason}")]
    MalformedLink {
        location: String,
        link: String,
        reason: &'static str,
    },
    /// A sidebar prefix is registered with no entries.
    #[error("{location}: sidebar prefix {prefix:?} has no entries")]
    EmptySidebar { location: String, prefix: String },
    /// A sidebar prefix does not start with `/`.
    #[error("{location}: sidebar prefix {prefix:?} must start with '/'")]
    InvalidSidebarPrefix { location: String, prefix: String },
    /// Two sidebar prefixes differ only by trailing slashes.
    #[error("{location}: sidebar prefixes {first:?} and {second:?} overlap")]
    DuplicateSidebarPrefix {
        location: String,
        first: String,
        second: String,
    },
    /// Base path is not of the form `/` or `/path/`.
    #[error("base must start and end with '/', got {0:?}")]
    InvalidBase(String),
    /// A locale is declared without a tag.
    #[error("locales[{index}]: locale tag cannot be empty")]
    EmptyLocaleTag { index: usize },
    /// Two locales share a tag.
    #[error("locale tag {0:?} is declared more than once")]
    DuplicateLocale(String),
    /// A locale link is not an absolute path.
    #[error("locales[{tag:?}].link: locale link {link:?} must start with '/'")]
    InvalidLocaleLink { tag: String, link: String },
}

/// Validate the root declaration and lower it into a manifest without
/// locale variants.
pub(crate) fn lower_root(root: &RootDeclaration) -> Result<SiteManifest, ValidationError> {
    require_non_empty(&root.title, "title")?;
    require_non_empty(&root.lang, "lang")?;
    if !root.base.starts_with('/') || !root.base.ends_with('/') {
        return Err(ValidationError::InvalidBase(root.base.clone()));
    }

    Ok(SiteManifest {
        title: root.title.clone(),
        description: root.description.clone(),
        lang: root.lang.clone(),
        base: root.base.clone(),
        out_dir: root.out_dir.clone(),
        markdown: root.markdown.clone(),
        head: root.head.clone(),
        theme: lower_theme(&root.theme, "theme")?,
        locales: Vec::new(),
    })
}

fn lower_theme(theme: &ThemeDeclaration, location: &str) -> Result<ThemeConfig, ValidationError> {
    Ok(ThemeConfig {
        logo: theme.logo.clone(),
        nav: lower_nav(&theme.nav, &format!("{location}.nav"))?,
        sidebar: lower_sidebar(&theme.sidebar, &format!("{location}.sidebar"))?,
        social_links: theme.social_links.clone(),
        footer: theme.footer.clone(),
        outline_label: theme.outline_label.clone(),
        dark_mode_label: theme.dark_mode_label.clone(),
        last_updated_label: theme.last_updated_label.clone(),
        doc_footer: theme.doc_footer.clone(),
        search: theme.search.clone(),
    })
}

/// Validate a locale declaration and lower it into an overlay.
///
/// Only fields present in the declaration are validated.
pub(crate) fn lower_locale(
    index: usize,
    locale: &LocaleDeclaration,
) -> Result<LocaleOverlay, ValidationError> {
    if locale.tag.is_empty() {
        return Err(ValidationError::EmptyLocaleTag { index });
    }
    let location = format!("locales[{:?}]", locale.tag);

    if let Some(link) = &locale.link
        && !link.starts_with('/')
    {
        return Err(ValidationError::InvalidLocaleLink {
            tag: locale.tag.clone(),
            link: link.clone(),
        });
    }
    if let Some(title) = &locale.title {
        require_non_empty(title, &format!("{location}.title"))?;
    }
    if let Some(lang) = &locale.lang {
        require_non_empty(lang, &format!("{location}.lang"))?;
    }

    Ok(LocaleOverlay {
        tag: locale.tag.clone(),
        label: if locale.label.is_empty() {
            locale.tag.clone()
        } else {
            locale.label.clone()
        },
        link: locale.link.clone(),
        lang: locale.lang.clone(),
        title: locale.title.clone(),
        description: locale.description.clone(),
        theme: lower_theme_overlay(&locale.theme, &format!("{location}.theme"))?,
    })
}

fn lower_theme_overlay(
    theme: &ThemeOverlayDeclaration,
    location: &str,
) -> Result<ThemeOverlay, ValidationError> {
    let nav = theme
        .nav
        .as_ref()
        .map(|nav| lower_nav(nav, &format!("{location}.nav")))
        .transpose()?;
    let sidebar = theme
        .sidebar
        .as_ref()
        .map(|sidebar| lower_sidebar(sidebar, &format!("{location}.sidebar")))
        .transpose()?;

    Ok(ThemeOverlay {
        logo: theme.logo.clone(),
        nav,
        sidebar,
        social_links: theme.social_links.clone(),
        footer: theme.footer.clone(),
        outline_label: theme.outline_label.clone(),
        dark_mode_label: theme.dark_mode_label.clone(),
        last_updated_label: theme.last_updated_label.clone(),
        doc_footer: theme.doc_footer.clone(),
        search: theme.search.clone(),
    })
}

fn lower_nav(
    items: &[NavItemDeclaration],
    location: &str,
) -> Result<Vec<NavItem>, ValidationError> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| lower_nav_item(item, &format!("{location}[{i}]")))
        .collect()
}

fn lower_nav_item(item: &NavItemDeclaration, location: &str) -> Result<NavItem, ValidationError> {
    require_label(&item.text, location)?;
    let link = lower_link(item.link.as_deref(), location)?;
    if link.is_none() && item.items.is_empty() {
        return Err(ValidationError::MissingTarget {
            location: location.to_owned(),
        });
    }
    Ok(NavItem {
        label: item.text.clone(),
        link,
        items: lower_nav(&item.items, &format!("{location}.items"))?,
    })
}

fn lower_sidebar(
    sidebar: &SidebarDeclaration,
    location: &str,
) -> Result<SidebarMap, ValidationError> {
    let declared = match sidebar {
        SidebarDeclaration::Single(entries) => {
            let mut map = BTreeMap::new();
            map.insert("/".to_owned(), entries.clone());
            map
        }
        SidebarDeclaration::ByPrefix(map) => map.clone(),
    };

    let mut seen: BTreeMap<&str, &str> = BTreeMap::new();
    let mut lowered = BTreeMap::new();
    for (prefix, entries) in &declared {
        if !prefix.starts_with('/') {
            return Err(ValidationError::InvalidSidebarPrefix {
                location: location.to_owned(),
                prefix: prefix.clone(),
            });
        }
        if let Some(first) = seen.insert(normalize_prefix(prefix), prefix) {
            return Err(ValidationError::DuplicateSidebarPrefix {
                location: location.to_owned(),
                first: first.to_owned(),
                second: prefix.clone(),
            });
        }
        if entries.is_empty() {
            return Err(ValidationError::EmptySidebar {
                location: location.to_owned(),
                prefix: prefix.clone(),
            });
        }
        let tree = lower_entries(entries, &format!("{location}[{prefix:?}]"))?;
        lowered.insert(prefix.clone(), tree);
    }
    Ok(SidebarMap::new(lowered))
}

fn lower_entries(
    entries: &[SidebarEntryDeclaration],
    location: &str,
) -> Result<Vec<SidebarEntry>, ValidationError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| lower_entry(entry, &format!("{location}[{i}]")))
        .collect()
}

fn lower_entry(
    entry: &SidebarEntryDeclaration,
    location: &str,
) -> Result<SidebarEntry, ValidationError> {
    let link = lower_link(entry.link.as_deref(), location)?;

    match &entry.items {
        Some(items) => {
            if let Some(label) = &entry.text {
                require_label(label, location)?;
            }
            Ok(SidebarEntry::Section(SidebarSection {
                label: entry.text.clone(),
                link,
                collapsed: entry.collapsed,
                items: lower_entries(items, &format!("{location}.items"))?,
            }))
        }
        None => {
            let label = entry.text.as_deref().unwrap_or_default();
            require_label(label, location)?;
            if link.is_none() {
                return Err(ValidationError::MissingTarget {
                    location: location.to_owned(),
                });
            }
            Ok(SidebarEntry::Item(NavItem {
                label: label.to_owned(),
                link,
                items: Vec::new(),
            }))
        }
    }
}

fn lower_link(link: Option<&str>, location: &str) -> Result<Option<LinkTarget>, ValidationError> {
    link.map(|raw| {
        LinkTarget::parse(raw).map_err(|reason| ValidationError::MalformedLink {
            location: location.to_owned(),
            link: raw.to_owned(),
            reason,
        })
    })
    .transpose()
}

fn require_label(label: &str, location: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel {
            location: location.to_owned(),
        });
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField {
            field: field.to_owned(),
        });
    }
    Ok(())
}
