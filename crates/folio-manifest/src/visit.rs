//! Traversal of navigation and sidebar entries.
//!
//! Entries are visited as sibling groups (all entries at one nesting level)
//! so callers can compare siblings. Locale trees identical to the root's are
//! skipped to avoid reporting inherited entries once per locale.

use crate::link::LinkTarget;
use crate::model::{NavItem, SidebarEntry, SiteManifest, ThemeConfig};

/// The visited entry with its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Node<'a> {
    Nav(&'a NavItem),
    Sidebar(&'a SidebarEntry),
}

/// One entry of a sibling group.
pub(crate) struct Entry<'a> {
    /// Location path expression (e.g., `theme.nav[0].items[1]`).
    pub location: String,
    pub label: Option<&'a str>,
    pub link: Option<&'a LinkTarget>,
    pub node: Node<'a>,
}

/// Visit every sibling group of the root and each locale.
pub(crate) fn visit_sibling_groups<'a>(
    manifest: &'a SiteManifest,
    f: &mut dyn FnMut(&[Entry<'a>]),
) {
    visit_theme(&manifest.theme, None, "theme", f);
    for locale in &manifest.locales {
        let location = format!("locales[{:?}].theme", locale.tag);
        visit_theme(&locale.manifest.theme, Some(&manifest.theme), &location, f);
    }
}

fn visit_theme<'a>(
    theme: &'a ThemeConfig,
    inherited: Option<&ThemeConfig>,
    location: &str,
    f: &mut dyn FnMut(&[Entry<'a>]),
) {
    if inherited.is_none_or(|root| root.nav != theme.nav) {
        visit_nav(&theme.nav, &format!("{location}.nav"), f);
    }
    for (prefix, tree) in theme.sidebar.iter() {
        if inherited.and_then(|root| root.sidebar.get(prefix)) == Some(tree) {
            continue;
        }
        visit_entries(tree, &format!("{location}.sidebar[{prefix:?}]"), f);
    }
}

fn visit_nav<'a>(items: &'a [NavItem], location: &str, f: &mut dyn FnMut(&[Entry<'a>])) {
    let group: Vec<Entry<'a>> = items
        .iter()
        .enumerate()
        .map(|(i, item)| Entry {
            location: format!("{location}[{i}]"),
            label: Some(item.label.as_str()),
            link: item.link.as_ref(),
            node: Node::Nav(item),
        })
        .collect();
    f(&group);

    for (i, item) in items.iter().enumerate() {
        if !item.items.is_empty() {
            visit_nav(&item.items, &format!("{location}[{i}].items"), f);
        }
    }
}

fn visit_entries<'a>(entries: &'a [SidebarEntry], location: &str, f: &mut dyn FnMut(&[Entry<'a>])) {
    let group: Vec<Entry<'a>> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| Entry {
            location: format!("{location}[{i}]"),
            label: entry.label(),
            link: entry.link(),
            node: Node::Sidebar(entry),
        })
        .collect();
    f(&group);

    for (i, entry) in entries.iter().enumerate() {
        if let SidebarEntry::Section(section) = entry {
            visit_entries(&section.items, &format!("{location}[{i}].items"), f);
        }
    }
}
