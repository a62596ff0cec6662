//! Repository view models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository card in the organization listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub repo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub open_issues_count: u64,
    pub watchers: u64,
    pub stargazers_count: u64,
}

/// Full metadata for a single repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub summary: RepositorySummary,
    pub owner: String,
    pub avatar_url: String,
    pub forks: u64,
    pub language: Option<String>,
    /// License display name
    pub license: Option<String>,
    pub private: bool,
}

impl RepositoryDetail {
    pub fn name(&self) -> &str {
        &self.summary.name
    }
}

impl From<RepositoryDetail> for RepositorySummary {
    fn from(detail: RepositoryDetail) -> Self {
        detail.summary
    }
}

/// Repository metadata fetched together with its README.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDetailWithReadme {
    #[serde(flatten)]
    pub detail: RepositoryDetail,
    pub readme: Option<String>,
}
