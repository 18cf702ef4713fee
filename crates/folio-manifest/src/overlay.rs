//! Locale overlays.
//!
//! A locale overlay is a sparse set of overrides on top of the root manifest.
//! Resolution is field by field: a present field replaces the root's value,
//! an absent one inherits it. Theme fields are overlaid individually and
//! search labels per key.

use crate::model::{
    DocFooter, Footer, NavItem, SearchUiStrings, SidebarMap, SiteManifest, SocialLink,
    ThemeConfig,
};

/// Validated locale overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocaleOverlay {
    /// Locale tag (e.g., `zhs`).
    pub tag: String,
    /// Label in the language switcher.
    pub label: String,
    /// Locale root path (e.g., `/zhs/`).
    pub link: Option<String>,
    pub lang: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub theme: ThemeOverlay,
}

/// Theme overrides of a locale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThemeOverlay {
    pub logo: Option<String>,
    pub nav: Option<Vec<NavItem>>,
    pub sidebar: Option<SidebarMap>,
    pub social_links: Option<Vec<SocialLink>>,
    pub footer: Option<Footer>,
    pub outline_label: Option<String>,
    pub dark_mode_label: Option<String>,
    pub last_updated_label: Option<String>,
    pub doc_footer: Option<DocFooter>,
    pub search: Option<SearchUiStrings>,
}

/// Apply a locale overlay to the root manifest.
///
/// Returns the manifest as seen by the locale. The result carries no locale
/// variants of its own. Neither input is modified.
#[must_use]
pub fn merge_locale_overlay(root: &SiteManifest, overlay: &LocaleOverlay) -> SiteManifest {
    SiteManifest {
        title: pick(&root.title, overlay.title.as_ref()),
        description: pick(&root.description, overlay.description.as_ref()),
        lang: pick(&root.lang, overlay.lang.as_ref()),
        base: root.base.clone(),
        out_dir: root.out_dir.clone(),
        markdown: root.markdown.clone(),
        head: root.head.clone(),
        theme: merge_theme(&root.theme, &overlay.theme),
        locales: Vec::new(),
    }
}

fn merge_theme(root: &ThemeConfig, overlay: &ThemeOverlay) -> ThemeConfig {
    ThemeConfig {
        logo: pick_opt(root.logo.as_ref(), overlay.logo.as_ref()),
        nav: pick(&root.nav, overlay.nav.as_ref()),
        sidebar: pick(&root.sidebar, overlay.sidebar.as_ref()),
        social_links: pick(&root.social_links, overlay.social_links.as_ref()),
        footer: pick_opt(root.footer.as_ref(), overlay.footer.as_ref()),
        outline_label: pick_opt(root.outline_label.as_ref(), overlay.outline_label.as_ref()),
        dark_mode_label: pick_opt(
            root.dark_mode_label.as_ref(),
            overlay.dark_mode_label.as_ref(),
        ),
        last_updated_label: pick_opt(
            root.last_updated_label.as_ref(),
            overlay.last_updated_label.as_ref(),
        ),
        doc_footer: pick_opt(root.doc_footer.as_ref(), overlay.doc_footer.as_ref()),
        search: match &overlay.search {
            Some(search) => root.search.overlay(search),
            None => root.search.clone(),
        },
    }
}

/// Overlay value if present, otherwise the root's.
fn pick<T: Clone>(root: &T, overlay: Option<&T>) -> T {
    overlay.unwrap_or(root).clone()
}

fn pick_opt<T: Clone>(root: Option<&T>, overlay: Option<&T>) -> Option<T> {
    overlay.or(root).cloned()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::link::LinkTarget;
    use crate::model::{MarkdownOptions, SearchLabel, SidebarEntry};

    fn nav(label: &str, link: &str) -> NavItem {
        NavItem {
            label: label.to_owned(),
            link: Some(LinkTarget::Internal(link.to_owned())),
            items: Vec::new(),
        }
    }

    fn root() -> SiteManifest {
        let mut sidebar = BTreeMap::new();
        sidebar.insert(
            "/docs/".to_owned(),
            vec![SidebarEntry::Item(nav("類型", "/docs/types"))],
        );
        SiteManifest {
            title: "Rust 筆記".to_owned(),
            description: "Rust 程式設計指南".to_owned(),
            lang: "zh-Hant".to_owned(),
            base: "/".to_owned(),
            out_dir: PathBuf::from("dist"),
            markdown: MarkdownOptions::default(),
            head: Vec::new(),
            theme: ThemeConfig {
                nav: vec![nav("指南", "/docs/introduction")],
                sidebar: SidebarMap::new(sidebar),
                outline_label: Some("本頁目錄".to_owned()),
                dark_mode_label: Some("外觀".to_owned()),
                search: SearchUiStrings::from_pairs([
                    (SearchLabel::ButtonText, "搜尋".to_owned()),
                    (SearchLabel::NoResultsText, "無法找到相關結果".to_owned()),
                ]),
                ..Default::default()
            },
            locales: Vec::new(),
        }
    }

    fn overlay(tag: &str) -> LocaleOverlay {
        LocaleOverlay {
            tag: tag.to_owned(),
            label: tag.to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_overlay_inherits_everything() {
        let root = root();
        let merged = merge_locale_overlay(&root, &overlay("zhs"));
        assert_eq!(merged, root);
    }

    #[test]
    fn test_present_fields_override() {
        let root = root();
        let overlay = LocaleOverlay {
            title: Some("Rust 笔记".to_owned()),
            lang: Some("zh-Hans".to_owned()),
            theme: ThemeOverlay {
                nav: Some(vec![nav("指南", "/zhs/docs/introduction")]),
                outline_label: Some("本页目录".to_owned()),
                ..Default::default()
            },
            ..overlay("zhs")
        };

        let merged = merge_locale_overlay(&root, &overlay);

        assert_eq!(merged.title, "Rust 笔记");
        assert_eq!(merged.lang, "zh-Hans");
        assert_eq!(merged.theme.nav, vec![nav("指南", "/zhs/docs/introduction")]);
        assert_eq!(merged.theme.outline_label.as_deref(), Some("本页目录"));
        // Inherited
        assert_eq!(merged.description, root.description);
        assert_eq!(merged.theme.sidebar, root.theme.sidebar);
        assert_eq!(merged.theme.dark_mode_label.as_deref(), Some("外觀"));
    }

    #[test]
    fn test_search_labels_merge_per_key() {
        let root = root();
        let overlay = LocaleOverlay {
            theme: ThemeOverlay {
                search: Some(SearchUiStrings::from_pairs([(
                    SearchLabel::ButtonText,
                    "搜索".to_owned(),
                )])),
                ..Default::default()
            },
            ..overlay("zhs")
        };

        let merged = merge_locale_overlay(&root, &overlay);

        assert_eq!(merged.theme.search.get(SearchLabel::ButtonText), Some("搜索"));
        assert_eq!(
            merged.theme.search.get(SearchLabel::NoResultsText),
            Some("無法找到相關結果")
        );
    }

    #[test]
    fn test_empty_sidebar_override_replaces_root() {
        let root = root();
        let overlay = LocaleOverlay {
            theme: ThemeOverlay {
                sidebar: Some(SidebarMap::default()),
                ..Default::default()
            },
            ..overlay("en")
        };

        let merged = merge_locale_overlay(&root, &overlay);
        assert!(merged.theme.sidebar.is_empty());
    }

    #[test]
    fn test_inputs_untouched() {
        let root = root();
        let before = root.clone();
        let overlay = LocaleOverlay {
            title: Some("Other".to_owned()),
            ..overlay("en")
        };
        let overlay_before = overlay.clone();

        let _ = merge_locale_overlay(&root, &overlay);

        assert_eq!(root, before);
        assert_eq!(overlay, overlay_before);
    }

    #[test]
    fn test_result_has_no_locales() {
        let mut root = root();
        let view = root.clone();
        root.locales.push(crate::model::LocaleVariant {
            tag: "zhs".to_owned(),
            label: "简体中文".to_owned(),
            link: Some("/zhs/".to_owned()),
            manifest: view,
        });

        let merged = merge_locale_overlay(&root, &overlay("en"));
        assert!(merged.locales.is_empty());
    }
}
