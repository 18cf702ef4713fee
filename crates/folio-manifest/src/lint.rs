//! Non-fatal manifest checks.
//!
//! Duplicate siblings (identical label, target and children at one nesting
//! level) are reported, never removed.

use std::fmt;

use crate::link::LinkTarget;
use crate::model::SiteManifest;
use crate::visit::visit_sibling_groups;

/// A lint finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Location of the duplicate entry.
    pub location: String,
    /// Location of the first entry it duplicates.
    pub duplicate_of: String,
    /// Shared label.
    pub label: String,
    /// Shared link target.
    pub link: Option<String>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: duplicate of {} (text {:?}",
            self.location, self.duplicate_of, self.label
        )?;
        if let Some(link) = &self.link {
            write!(f, ", link {link:?}")?;
        }
        f.write_str(")")
    }
}

/// Report duplicate sibling entries in every nav bar and sidebar tree.
#[must_use]
pub fn lint(manifest: &SiteManifest) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    visit_sibling_groups(manifest, &mut |group| {
        for (i, entry) in group.iter().enumerate() {
            let Some(label) = entry.label else {
                continue;
            };
            if let Some(first) = group[..i].iter().find(|earlier| earlier.node == entry.node) {
                diagnostics.push(Diagnostic {
                    location: entry.location.clone(),
                    duplicate_of: first.location.clone(),
                    label: label.to_owned(),
                    link: entry.link.map(LinkTarget::as_str).map(str::to_owned),
                });
            }
        }
    });

    diagnostics
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::declaration::SiteDeclaration;

    fn manifest(yaml: &str) -> SiteManifest {
        SiteDeclaration::from_yaml(yaml).unwrap().build().unwrap()
    }

    #[test]
    fn test_no_duplicates() {
        let manifest = manifest(
            r"
title: Notes
theme:
  nav:
    - text: Guide
      link: /docs/introduction
    - text: Notes
      link: /miji/introduction
",
        );
        assert!(lint(&manifest).is_empty());
    }

    #[test]
    fn test_duplicate_sidebar_entry_flagged_not_removed() {
        let manifest = manifest(
            r"
title: Notes
theme:
  sidebar:
    /docs/:
      - text: Basics
        items:
          - text: Types
            link: /docs/types
          - text: Variables
            link: /docs/variables
          - text: Types
            link: /docs/types
",
        );

        let diagnostics = lint(&manifest);

        assert_eq!(
            diagnostics,
            vec![Diagnostic {
                location: r#"theme.sidebar["/docs/"][0].items[2]"#.to_owned(),
                duplicate_of: r#"theme.sidebar["/docs/"][0].items[0]"#.to_owned(),
                label: "Types".to_owned(),
                link: Some("/docs/types".to_owned()),
            }]
        );
        // The entry is still present
        let tree = manifest.theme.sidebar.get("/docs/").unwrap();
        let crate::SidebarEntry::Section(section) = &tree[0] else {
            panic!("expected section");
        };
        assert_eq!(section.items.len(), 3);
    }

    #[test]
    fn test_sections_with_different_children_not_flagged() {
        let manifest = manifest(
            r"
title: Notes
theme:
  sidebar:
    /docs/:
      - text: Basics
        items:
          - text: Types
            link: /docs/types
      - text: Basics
        items:
          - text: Variables
            link: /docs/variables
",
        );
        assert!(lint(&manifest).is_empty());
    }

    #[test]
    fn test_identical_sections_flagged() {
        let manifest = manifest(
            r"
title: Notes
theme:
  sidebar:
    /docs/:
      - text: Basics
        items:
          - text: Types
            link: /docs/types
      - text: Basics
        items:
          - text: Types
            link: /docs/types
",
        );

        let diagnostics = lint(&manifest);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, r#"theme.sidebar["/docs/"][1]"#);
        assert_eq!(diagnostics[0].link, None);
    }

    #[test]
    fn test_same_label_different_link_not_flagged() {
        let manifest = manifest(
            r"
title: Notes
theme:
  nav:
    - text: Guide
      link: /docs/introduction
    - text: Guide
      link: /miji/introduction
",
        );
        assert!(lint(&manifest).is_empty());
    }

    #[test]
    fn test_entries_at_different_levels_not_compared() {
        let manifest = manifest(
            r"
title: Notes
theme:
  sidebar:
    /docs/:
      - text: Types
        link: /docs/types
      - text: More
        items:
          - text: Types
            link: /docs/types
",
        );
        assert!(lint(&manifest).is_empty());
    }

    #[test]
    fn test_inherited_locale_tree_reported_once() {
        let manifest = manifest(
            r"
title: Notes
theme:
  nav:
    - text: Guide
      link: /docs/introduction
    - text: Guide
      link: /docs/introduction
locales:
  - tag: zhs
    title: 笔记
",
        );
        let diagnostics = lint(&manifest);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, "theme.nav[1]");
    }

    #[test]
    fn test_locale_override_checked() {
        let manifest = manifest(
            r"
title: Notes
locales:
  - tag: zhs
    theme:
      nav:
        - text: 指南
          link: /zhs/docs/introduction
        - text: 指南
          link: /zhs/docs/introduction
",
        );
        let diagnostics = lint(&manifest);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location, r#"locales["zhs"].theme.nav[1]"#);
    }

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic {
            location: "theme.nav[1]".to_owned(),
            duplicate_of: "theme.nav[0]".to_owned(),
            label: "Guide".to_owned(),
            link: Some("/docs/".to_owned()),
        };
        assert_eq!(
            diagnostic.to_string(),
            r#"theme.nav[1]: duplicate of theme.nav[0] (text "Guide", link "/docs/")"#
        );
    }
}
