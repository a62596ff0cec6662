//! Tag page model and preview-deployment link construction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"v?(\d+\.\d+\.\d+)").expect("valid version pattern"));

/// One page of tag names plus a hint whether another page may exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPage {
    pub tags: Vec<String>,
    pub has_more: bool,
}

impl TagPage {
    /// `has_more` is true whenever a full page came back.
    pub fn from_fetched(tags: Vec<String>, page_size: u32) -> Self {
        let has_more = tags.len() >= page_size as usize;
        Self { tags, has_more }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Extract `X.Y.Z` from a tag such as `v1.2.3`, or return the tag unchanged.
pub fn extract_version(tag: &str) -> &str {
    VERSION_PATTERN
        .captures(tag)
        .and_then(|caps| caps.get(1))
        .map_or(tag, |m| m.as_str())
}

/// Where tagged builds are deployed: `https://<prefix>-<version>.<domain>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSite {
    pub prefix: String,
    pub domain: String,
}

impl PreviewSite {
    pub fn new(prefix: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            domain: domain.into(),
        }
    }

    pub fn link(&self, tag: &str) -> TagLink {
        let version = extract_version(tag);
        TagLink {
            name: tag.to_string(),
            version: version.to_string(),
            preview_url: format!("https://{}-{}.{}", self.prefix, version, self.domain),
        }
    }
}

/// A tag chip on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLink {
    pub name: String,
    pub version: String,
    pub preview_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("v1.2.3"), "1.2.3");
        assert_eq!(extract_version("1.2.3"), "1.2.3");
        assert_eq!(extract_version("app-v10.0.12-rc1"), "10.0.12");
        assert_eq!(extract_version("release-2024"), "release-2024");
        assert_eq!(extract_version("v1.2"), "v1.2");
    }

    #[test]
    fn test_preview_link() {
        let site = PreviewSite::new("nextjs", "0human.website");
        let link = site.link("v0.4.1");
        assert_eq!(link.name, "v0.4.1");
        assert_eq!(link.version, "0.4.1");
        assert_eq!(link.preview_url, "https://nextjs-0.4.1.0human.website");

        let fallback = site.link("nightly");
        assert_eq!(fallback.preview_url, "https://nextjs-nightly.0human.website");
    }

    #[test]
    fn test_has_more_from_full_page() {
        let full: Vec<String> = (0..10).map(|i| format!("v0.0.{i}")).collect();
        assert!(TagPage::from_fetched(full, 10).has_more);

        let partial: Vec<String> = (0..9).map(|i| format!("v0.0.{i}")).collect();
        assert!(!TagPage::from_fetched(partial, 10).has_more);

        assert!(!TagPage::from_fetched(Vec::new(), 10).has_more);
    }
}
