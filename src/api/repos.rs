//! Repository read endpoints.

use axum::extract::{Path, Query, State};

use super::{success, ApiResult};
use crate::models::{
    PaginationParams, PaginationQuery, RepositoryDetail, RepositoryDetailWithReadme,
    RepositorySummary, TagPage,
};
use crate::AppState;

/// GET /api/repos - One page of showcased repositories.
pub async fn list_repos(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Vec<RepositorySummary>> {
    let params = PaginationParams::from(query);
    success(state.showcase.list_repositories(params).await)
}

/// GET /api/repos/:repo - Repository metadata, `null` when unavailable.
pub async fn get_repo_basic_info(
    State(state): State<AppState>,
    Path(repo): Path<String>,
) -> ApiResult<Option<RepositoryDetail>> {
    success(state.showcase.repo_basic_info(&repo).await)
}

/// GET /api/repos/:repo/readme - Decoded README text, `null` when unavailable.
pub async fn get_repo_readme(
    State(state): State<AppState>,
    Path(repo): Path<String>,
) -> ApiResult<Option<String>> {
    success(state.showcase.repo_readme(&repo).await)
}

/// GET /api/repos/:repo/tags - One page of tag names.
pub async fn get_repo_tags(
    State(state): State<AppState>,
    Path(repo): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<TagPage> {
    let params = PaginationParams::from(query);
    success(state.showcase.repo_tags(&repo, params).await)
}

/// GET /api/repos/:repo/detail - Metadata and README together.
pub async fn get_repo_detail(
    State(state): State<AppState>,
    Path(repo): Path<String>,
) -> ApiResult<Option<RepositoryDetailWithReadme>> {
    success(state.showcase.repo_detail(&repo).await)
}
