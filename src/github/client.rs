//! `reqwest`-backed GitHub REST client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{UpstreamClient, UpstreamError};
use crate::models::{RepositoryDetail, RepositorySummary};

pub const GITHUB_API: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("repo-showcase/", env!("CARGO_PKG_VERSION"));

/// Thin client over the GitHub REST API.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, UpstreamError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        // https://docs.github.com/en/rest/about-the-rest-api/api-versions
        let builder = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn fetch<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, UpstreamError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(classify(status, response.headers()));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

fn classify(status: StatusCode, headers: &HeaderMap) -> UpstreamError {
    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0");

    match status {
        StatusCode::NOT_FOUND => UpstreamError::NotFound,
        StatusCode::UNAUTHORIZED => UpstreamError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => UpstreamError::RateLimited,
        StatusCode::FORBIDDEN if quota_exhausted => UpstreamError::RateLimited,
        StatusCode::FORBIDDEN => UpstreamError::Unauthorized,
        other => UpstreamError::Status(other.as_u16()),
    }
}

#[derive(Deserialize)]
struct WireRepo {
    id: u64,
    name: String,
    description: Option<String>,
    html_url: String,
    owner: WireOwner,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    watchers: u64,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks: u64,
    language: Option<String>,
    license: Option<WireLicense>,
    #[serde(default)]
    private: bool,
}

#[derive(Deserialize)]
struct WireOwner {
    login: String,
    avatar_url: String,
}

#[derive(Deserialize)]
struct WireLicense {
    name: String,
}

#[derive(Deserialize)]
struct WireContent {
    content: String,
}

#[derive(Deserialize)]
struct WireTag {
    name: String,
}

impl From<WireRepo> for RepositoryDetail {
    fn from(repo: WireRepo) -> Self {
        RepositoryDetail {
            summary: RepositorySummary {
                id: repo.id,
                name: repo.name,
                description: repo.description,
                repo_url: repo.html_url,
                created_at: repo.created_at,
                updated_at: repo.updated_at,
                open_issues_count: repo.open_issues_count,
                watchers: repo.watchers,
                stargazers_count: repo.stargazers_count,
            },
            owner: repo.owner.login,
            avatar_url: repo.owner.avatar_url,
            forks: repo.forks,
            language: repo.language,
            license: repo.license.map(|l| l.name),
            private: repo.private,
        }
    }
}

#[async_trait]
impl UpstreamClient for GithubClient {
    async fn get_repo(&self, owner: &str, repo: &str) -> Result<RepositoryDetail, UpstreamError> {
        // https://docs.github.com/en/rest/repos/repos#get-a-repository
        let builder = self.get(&format!("/repos/{owner}/{repo}"));
        let repo: WireRepo = Self::fetch(builder).await?;
        Ok(repo.into())
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<String, UpstreamError> {
        // https://docs.github.com/en/rest/repos/contents#get-a-repository-readme
        let builder = self.get(&format!("/repos/{owner}/{repo}/readme"));
        let content: WireContent = Self::fetch(builder).await?;
        Ok(content.content)
    }

    async fn list_tags(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<String>, UpstreamError> {
        // https://docs.github.com/en/rest/repos/repos#list-repository-tags
        let builder = self
            .get(&format!("/repos/{owner}/{repo}/tags"))
            .query(&[("per_page", per_page), ("page", page)]);
        let tags: Vec<WireTag> = Self::fetch(builder).await?;
        tracing::debug!(target: "github", "{owner}/{repo}: {} tags on page {page}", tags.len());
        Ok(tags.into_iter().map(|t| t.name).collect())
    }

    async fn list_org_repos(
        &self,
        org: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<RepositoryDetail>, UpstreamError> {
        // https://docs.github.com/en/rest/repos/repos#list-organization-repositories
        let builder = self.get(&format!("/orgs/{org}/repos")).query(&[
            ("type", "public".to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ]);
        let repos: Vec<WireRepo> = Self::fetch(builder).await?;
        tracing::debug!(target: "github", "{org}: {} repositories on page {page}", repos.len());
        Ok(repos.into_iter().map(RepositoryDetail::from).collect())
    }
}
