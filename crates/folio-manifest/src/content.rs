//! Cross-checking internal links against the content tree.
//!
//! The manifest must not link to pages nobody intends to write. Existence of
//! a document is answered by a [`ContentTree`]; [`FsContentTree`] maps URL
//! paths onto markdown files the way the site framework routes them:
//!
//! - `/` → `index.md`
//! - `/docs/` → `docs/index.md`
//! - `/docs/types` → `docs/types.md` or `docs/types/index.md`
//!
//! A trailing `.md` or `.html` on the link is ignored.

use std::path::{Path, PathBuf};

use crate::model::SiteManifest;
use crate::visit::visit_sibling_groups;

/// Answers whether a document exists for an internal URL path.
pub trait ContentTree {
    /// Check whether a document backs `path` (leading slash, no query or
    /// fragment).
    fn exists(&self, path: &str) -> bool;
}

/// Content tree backed by markdown files in a source directory.
#[derive(Clone, Debug)]
pub struct FsContentTree {
    source_dir: PathBuf,
}

impl FsContentTree {
    /// Create a content tree rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Source directory.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Candidate files for a URL path, relative to the source directory.
    fn candidates(path: &str) -> Vec<PathBuf> {
        let rel = path.trim_start_matches('/');
        let rel = rel
            .strip_suffix(".md")
            .or_else(|| rel.strip_suffix(".html"))
            .unwrap_or(rel);

        if rel.split('/').any(|segment| segment == "..") {
            return Vec::new();
        }
        if rel.is_empty() || rel.ends_with('/') {
            return vec![PathBuf::from(format!("{rel}index.md"))];
        }
        vec![
            PathBuf::from(format!("{rel}.md")),
            PathBuf::from(rel).join("index.md"),
        ]
    }
}

impl ContentTree for FsContentTree {
    fn exists(&self, path: &str) -> bool {
        Self::candidates(path)
            .iter()
            .any(|candidate| self.source_dir.join(candidate).is_file())
    }
}

/// An internal link with no backing document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingLink {
    /// Location of the entry in the manifest.
    pub location: String,
    /// Link as declared.
    pub link: String,
}

/// Find internal links in nav bars and sidebars that no document backs.
///
/// External links are not checked.
pub fn check_links(manifest: &SiteManifest, tree: &dyn ContentTree) -> Vec<DanglingLink> {
    let mut dangling = Vec::new();

    visit_sibling_groups(manifest, &mut |group| {
        for entry in group {
            let Some(link) = entry.link else {
                continue;
            };
            let Some(path) = link.internal_path() else {
                continue;
            };
            if !tree.exists(path) {
                tracing::debug!(location = %entry.location, link = %link, "Dangling link");
                dangling.push(DanglingLink {
                    location: entry.location.clone(),
                    link: link.as_str().to_owned(),
                });
            }
        }
    });

    dangling
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::declaration::SiteDeclaration;

    struct SetTree(HashSet<&'static str>);

    impl ContentTree for SetTree {
        fn exists(&self, path: &str) -> bool {
            self.0.contains(path)
        }
    }

    fn write(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# Page\n").unwrap();
    }

    #[test]
    fn test_fs_tree_root_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        let tree = FsContentTree::new(temp_dir.path());
        assert!(!tree.exists("/"));

        write(temp_dir.path(), "index.md");
        assert!(tree.exists("/"));
    }

    #[test]
    fn test_fs_tree_page_and_directory_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "docs/types.md");
        write(temp_dir.path(), "docs/ownership/index.md");
        let tree = FsContentTree::new(temp_dir.path());

        assert!(tree.exists("/docs/types"));
        assert!(tree.exists("/docs/types.md"));
        assert!(tree.exists("/docs/types.html"));
        assert!(tree.exists("/docs/ownership"));
        assert!(tree.exists("/docs/ownership/"));
        assert!(!tree.exists("/docs/"));
        assert!(!tree.exists("/docs/variables"));
    }

    #[test]
    fn test_fs_tree_rejects_parent_segments() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "secret.md");
        let tree = FsContentTree::new(temp_dir.path().join("docs"));
        assert!(!tree.exists("/../secret"));
    }

    #[test]
    fn test_check_links_reports_dangling() {
        let manifest = SiteDeclaration::from_yaml(
            r"
title: Notes
theme:
  nav:
    - text: Guide
      link: /docs/introduction#start
    - text: GitHub
      link: https://github.com/example/notes
  sidebar:
    /docs/:
      - text: Types
        link: /docs/types
",
        )
        .unwrap()
        .build()
        .unwrap();
        let tree = SetTree(HashSet::from(["/docs/introduction"]));

        let dangling = check_links(&manifest, &tree);

        assert_eq!(
            dangling,
            vec![DanglingLink {
                location: r#"theme.sidebar["/docs/"][0]"#.to_owned(),
                link: "/docs/types".to_owned(),
            }]
        );
    }

    #[test]
    fn test_check_links_includes_locale_overrides() {
        let manifest = SiteDeclaration::from_yaml(
            r"
title: Notes
theme:
  nav:
    - text: Guide
      link: /docs/introduction
locales:
  - tag: zhs
    link: /zhs/
    theme:
      nav:
        - text: 指南
          link: /zhs/docs/introduction
",
        )
        .unwrap()
        .build()
        .unwrap();
        let tree = SetTree(HashSet::from(["/docs/introduction"]));

        let dangling = check_links(&manifest, &tree);

        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].link, "/zhs/docs/introduction");
    }
}
