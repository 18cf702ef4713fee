//! Link targets for navigation and sidebar entries.

use std::fmt;

use serde::{Serialize, Serializer};

/// URL schemes accepted for external links.
const EXTERNAL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Where a navigation entry points.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    /// Site-internal path with leading slash (e.g., `/docs/types`).
    Internal(String),
    /// Absolute URL (e.g., `https://github.com/example/guide`).
    External(String),
}

impl LinkTarget {
    /// Parse a declared link string.
    ///
    /// Internal paths must start with `/`. External links must be absolute
    /// URLs with an `http`, `https` or `mailto` scheme.
    ///
    /// # Errors
    ///
    /// Returns a short reason when the link is malformed.
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        if raw.is_empty() {
            return Err("link cannot be empty");
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err("link cannot contain whitespace");
        }
        if raw.starts_with("//") {
            return Err("protocol-relative URLs are not supported");
        }
        if raw.starts_with('/') {
            return Ok(Self::Internal(raw.to_owned()));
        }

        let Some((scheme, rest)) = raw.split_once(':') else {
            return Err("expected an absolute path or an http(s)/mailto URL");
        };
        if !EXTERNAL_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
            return Err("unsupported URL scheme");
        }
        if scheme.eq_ignore_ascii_case("mailto") {
            if rest.is_empty() {
                return Err("mailto link has no address");
            }
        } else {
            let Some(authority) = rest.strip_prefix("//") else {
                return Err("URL must be absolute");
            };
            if authority.split(['/', '?', '#']).next().unwrap_or_default().is_empty() {
                return Err("URL has no host");
            }
        }
        Ok(Self::External(raw.to_owned()))
    }

    /// The link as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal(s) | Self::External(s) => s,
        }
    }

    /// Internal path without query string or fragment.
    ///
    /// Returns `None` for external links.
    #[must_use]
    pub fn internal_path(&self) -> Option<&str> {
        match self {
            Self::Internal(s) => s.split(['?', '#']).next(),
            Self::External(_) => None,
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for LinkTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
