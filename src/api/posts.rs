//! Demo post endpoints.

use axum::{extract::State, Json};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreatePostRequest, Post};
use crate::AppState;

/// POST /api/posts - Append a post.
pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> ApiResult<Post> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Post name is required".to_string()));
    }

    let post = state.posts.append(request.name).await;
    tracing::info!("Created post {}", post.id);
    success(post)
}

/// GET /api/posts/latest - Most recent post, `null` when there is none.
pub async fn get_latest_post(State(state): State<AppState>) -> ApiResult<Option<Post>> {
    success(state.posts.latest().await)
}
