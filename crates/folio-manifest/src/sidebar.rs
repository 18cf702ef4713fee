//! Sidebar selection by URL path prefix.
//!
//! Prefixes match on path-segment boundaries: `/docs` (or `/docs/`) matches
//! `/docs` and `/docs/types`, but not `/docsearch`. The root prefix `/`
//! matches every path.

use crate::model::{SidebarEntry, SidebarMap, SiteManifest};

/// Select the sidebar tree for a request path.
///
/// Returns the tree registered under the longest prefix of `path`, or an
/// empty slice when no prefix matches.
#[must_use]
pub fn resolve_sidebar_for<'a>(path: &str, manifest: &'a SiteManifest) -> &'a [SidebarEntry] {
    manifest.theme.sidebar.resolve(path)
}

impl SidebarMap {
    /// Select the tree registered under the longest prefix of `path`.
    ///
    /// Query strings and fragments in `path` are ignored. Returns an empty
    /// slice when no prefix matches.
    #[must_use]
    pub fn resolve(&self, path: &str) -> &[SidebarEntry] {
        self.0
            .iter()
            .filter_map(|(prefix, entries)| prefix_len(prefix, path).map(|len| (len, entries)))
            // On equal length keep the first key in prefix order
            .fold(None::<(usize, &Vec<SidebarEntry>)>, |best, (len, entries)| {
                match best {
                    Some((best_len, _)) if best_len >= len => best,
                    _ => Some((len, entries)),
                }
            })
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }
}

/// Normalize a registered prefix: drop trailing slashes (`/` becomes `""`).
pub(crate) fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_end_matches('/')
}

/// Length of the normalized `prefix` if it matches `path` on a segment
/// boundary.
pub(crate) fn prefix_len(prefix: &str, path: &str) -> Option<usize> {
    let prefix = normalize_prefix(prefix);
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(prefix.len())
}
