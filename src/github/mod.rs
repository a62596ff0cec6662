//! Upstream hosting API boundary.
//!
//! The rest of the crate only sees [`UpstreamClient`]; [`GithubClient`] is the
//! production implementation.

mod client;
#[cfg(test)]
pub mod fake;

pub use client::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::RepositoryDetail;

/// Failure talking to the hosting API.
#[derive(Debug, Clone, Error)]
pub enum UpstreamError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// True when the resource genuinely does not exist, as opposed to a failed call.
    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound)
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UpstreamError::Decode(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Read operations the showcase needs from the hosting provider.
///
/// Page numbers are one-based, following the hosting API.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<RepositoryDetail, UpstreamError>;

    /// Base64-encoded README content, possibly line-wrapped.
    async fn get_readme(&self, owner: &str, repo: &str) -> Result<String, UpstreamError>;

    async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<String>, UpstreamError>;

    /// Public repositories of `org`, most recently updated first.
    async fn list_org_repos(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryDetail>, UpstreamError>;
}
