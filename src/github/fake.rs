//! In-memory stand-in for the hosting API used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::{UpstreamClient, UpstreamError};
use crate::models::{RepositoryDetail, RepositorySummary};

/// Build a repository fixture updated `age_hours` before a fixed instant.
pub fn repo(id: u64, name: &str, age_hours: i64) -> RepositoryDetail {
    let epoch: DateTime<Utc> = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    RepositoryDetail {
        summary: RepositorySummary {
            id,
            name: name.to_string(),
            description: Some(format!("{name} description")),
            repo_url: format!("https://github.com/0human/{name}"),
            created_at: epoch - Duration::days(365),
            updated_at: epoch - Duration::hours(age_hours),
            open_issues_count: id % 4,
            watchers: id * 2,
            stargazers_count: id * 3,
        },
        owner: "0human".to_string(),
        avatar_url: "https://avatars.example/u/0human".to_string(),
        forks: id,
        language: Some("TypeScript".to_string()),
        license: None,
        private: false,
    }
}

/// Fake upstream that honours the hosting API's paging and ordering.
#[derive(Default)]
pub struct FakeUpstream {
    repos: Vec<RepositoryDetail>,
    readmes: HashMap<String, String>,
    tags: HashMap<String, Vec<String>>,
    unavailable: bool,
    listing_calls: AtomicUsize,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails as if the hosting API were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_repo(mut self, repo: RepositoryDetail) -> Self {
        self.repos.push(repo);
        self
    }

    /// Store README text; it is served base64-encoded and line-wrapped.
    pub fn with_readme(mut self, repo: &str, text: &str) -> Self {
        let encoded = STANDARD.encode(text);
        let wrapped = encoded
            .as_bytes()
            .chunks(60)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("\n");
        self.readmes.insert(repo.to_string(), wrapped);
        self
    }

    /// Store a README body verbatim, without encoding it.
    pub fn with_raw_readme(mut self, repo: &str, content: &str) -> Self {
        self.readmes.insert(repo.to_string(), content.to_string());
        self
    }

    pub fn with_tags(mut self, repo: &str, tags: &[&str]) -> Self {
        self.tags
            .insert(repo.to_string(), tags.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Number of listing pages requested so far.
    pub fn listing_calls(&self) -> usize {
        self.listing_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), UpstreamError> {
        if self.unavailable {
            Err(UpstreamError::Status(503))
        } else {
            Ok(())
        }
    }
}

fn page_of<T: Clone>(items: &[T], page: u32, per_page: u32) -> Vec<T> {
    let start = (page.max(1) as usize - 1) * per_page as usize;
    items
        .iter()
        .skip(start)
        .take(per_page as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl UpstreamClient for FakeUpstream {
    async fn get_repo(&self, _owner: &str, repo: &str) -> Result<RepositoryDetail, UpstreamError> {
        self.check()?;
        self.repos
            .iter()
            .find(|r| r.name() == repo)
            .cloned()
            .ok_or(UpstreamError::NotFound)
    }

    async fn get_readme(&self, _owner: &str, repo: &str) -> Result<String, UpstreamError> {
        self.check()?;
        self.readmes.get(repo).cloned().ok_or(UpstreamError::NotFound)
    }

    async fn list_tags(
        &self,
        _owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<String>, UpstreamError> {
        self.check()?;
        if !self.repos.iter().any(|r| r.name() == repo) {
            return Err(UpstreamError::NotFound);
        }
        let tags = self.tags.get(repo).cloned().unwrap_or_default();
        Ok(page_of(&tags, page, per_page))
    }

    async fn list_org_repos(
        &self,
        _org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryDetail>, UpstreamError> {
        self.listing_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut repos = self.repos.clone();
        repos.sort_by(|a, b| b.summary.updated_at.cmp(&a.summary.updated_at));
        Ok(page_of(&repos, page, per_page))
    }
}
