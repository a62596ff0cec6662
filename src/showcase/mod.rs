//! Aggregation procedures behind the site and the JSON API.
//!
//! Every read degrades to an absent or empty value when the hosting API fails;
//! nothing here returns an error to the caller.

use std::collections::HashSet;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::github::{UpstreamClient, UpstreamError};
use crate::models::{
    PaginationParams, PreviewSite, RepositoryDetail, RepositoryDetailWithReadme,
    RepositorySummary, TagPage,
};

/// Batch size used when walking the full organization listing.
pub const LISTING_BATCH_SIZE: u32 = 100;

/// Upper bound on listing pages fetched for one request.
const MAX_LISTING_PAGES: u32 = 50;

static REPO_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").expect("valid repository name pattern"));

/// Whether `name` could be a repository name on the hosting provider.
pub fn is_valid_repo_name(name: &str) -> bool {
    REPO_NAME.is_match(name) && name != "." && name != ".."
}

/// Decode base64 README transport content into text.
pub fn decode_readme(content: &str) -> Option<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read-side facade over the hosting API for one organization.
pub struct Showcase {
    upstream: Arc<dyn UpstreamClient>,
    org: String,
    denylist: HashSet<String>,
    preview: PreviewSite,
}

impl Showcase {
    pub fn new(
        upstream: Arc<dyn UpstreamClient>,
        org: impl Into<String>,
        denylist: impl IntoIterator<Item = String>,
        preview: PreviewSite,
    ) -> Self {
        Self {
            upstream,
            org: org.into(),
            denylist: denylist.into_iter().collect(),
            preview,
        }
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn preview(&self) -> &PreviewSite {
        &self.preview
    }

    pub fn is_denied(&self, name: &str) -> bool {
        self.denylist.contains(name)
    }

    /// List one page of showcased repositories, most recently updated first.
    ///
    /// The whole listing is fetched and filtered before slicing so that
    /// denylisted repositories never shift page boundaries.
    pub async fn list_repositories(&self, params: PaginationParams) -> Vec<RepositorySummary> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let batch = match self
                .upstream
                .list_org_repos(&self.org, page, LISTING_BATCH_SIZE)
                .await
            {
                Ok(batch) => batch,
                Err(e) => {
                    self.report("list repositories", &self.org, &e);
                    return Vec::new();
                }
            };
            let exhausted = batch.len() < LISTING_BATCH_SIZE as usize;
            all.extend(batch.into_iter().filter(|r| !self.is_denied(r.name())));
            if exhausted {
                break;
            }
            if page >= MAX_LISTING_PAGES {
                tracing::warn!(
                    "Stopped listing {} after {} pages",
                    self.org,
                    MAX_LISTING_PAGES
                );
                break;
            }
            page += 1;
        }

        tracing::debug!("Listed {} showcased repositories", all.len());

        all.into_iter()
            .skip(params.offset())
            .take(params.page_size as usize)
            .map(RepositorySummary::from)
            .collect()
    }

    /// Metadata for one repository, or `None` if it cannot be fetched.
    pub async fn repo_basic_info(&self, repo: &str) -> Option<RepositoryDetail> {
        if !is_valid_repo_name(repo) {
            return None;
        }
        match self.upstream.get_repo(&self.org, repo).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                self.report("get repository", repo, &e);
                None
            }
        }
    }

    /// README text for one repository, or `None` if missing or unreadable.
    pub async fn repo_readme(&self, repo: &str) -> Option<String> {
        if !is_valid_repo_name(repo) {
            return None;
        }
        let content = match self.upstream.get_readme(&self.org, repo).await {
            Ok(content) => content,
            Err(e) => {
                self.report("get readme", repo, &e);
                return None;
            }
        };
        let text = decode_readme(&content);
        if text.is_none() {
            tracing::warn!("README of {} is not valid base64", repo);
        }
        text
    }

    /// One page of tag names.
    pub async fn repo_tags(&self, repo: &str, params: PaginationParams) -> TagPage {
        if !is_valid_repo_name(repo) {
            return TagPage::empty();
        }
        match self
            .upstream
            .list_tags(&self.org, repo, params.upstream_page(), params.page_size)
            .await
        {
            Ok(tags) => TagPage::from_fetched(tags, params.page_size),
            Err(e) => {
                self.report("list tags", repo, &e);
                TagPage::empty()
            }
        }
    }

    /// Metadata and README in one call.
    pub async fn repo_detail(&self, repo: &str) -> Option<RepositoryDetailWithReadme> {
        let detail = self.repo_basic_info(repo).await?;
        let readme = self.repo_readme(repo).await;
        Some(RepositoryDetailWithReadme { detail, readme })
    }

    fn report(&self, operation: &str, subject: &str, err: &UpstreamError) {
        if err.is_not_found() {
            tracing::debug!("{} {}: not found upstream", operation, subject);
        } else {
            tracing::warn!("{} {} failed: {}", operation, subject, err);
        }
    }
}
