//! Presentation layer: server-rendered list and detail pages.

pub mod markdown;
mod pages;
pub mod tag_feed;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::models::{PaginationParams, PaginationQuery};
use crate::showcase::Showcase;
use crate::AppState;
use tag_feed::TagFeed;

/// Tags shown per "load more" step.
pub const TAG_PAGE_SIZE: u32 = 10;

/// Upper bound on tag pages rendered in one detail page.
pub const MAX_TAG_PAGES: u32 = 20;

const STYLESHEET: &str = include_str!("site.css");

/// Detail page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    /// Number of tag pages to show.
    #[serde(default)]
    pub tags: Option<i64>,
}

/// GET / - Repository card grid.
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Html<String> {
    let params = PaginationParams::from(query);
    let repos = state.showcase.list_repositories(params).await;
    Html(pages::repo_list(state.showcase.org(), &repos, params).into_string())
}

/// GET /:repo - Repository detail page, or a 404 page when it cannot be loaded.
pub async fn repo_page(
    State(state): State<AppState>,
    Path(repo): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let showcase = &state.showcase;
    let (detail, readme) = tokio::join!(showcase.repo_basic_info(&repo), showcase.repo_readme(&repo));

    let Some(detail) = detail else {
        return (
            StatusCode::NOT_FOUND,
            Html(pages::not_found(&repo).into_string()),
        )
            .into_response();
    };

    let wanted = query
        .tags
        .unwrap_or(1)
        .clamp(1, i64::from(MAX_TAG_PAGES)) as u32;
    let feed = load_tags(showcase, &repo, wanted).await;

    Html(
        pages::repo_detail(&detail, readme.as_deref(), &feed, showcase.preview()).into_string(),
    )
    .into_response()
}

/// GET /assets/site.css
pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

/// Drive a [`TagFeed`] until `pages` pages are loaded or tags run out.
pub async fn load_tags(showcase: &Showcase, repo: &str, pages: u32) -> TagFeed {
    let mut feed = TagFeed::new();
    let mut next = Some(feed.start());
    while let Some(ticket) = next {
        let page = showcase.repo_tags(repo, ticket.params(TAG_PAGE_SIZE)).await;
        feed.apply(ticket, page);
        next = if feed.pages_loaded() < pages {
            feed.load_more()
        } else {
            None
        };
    }
    feed
}
