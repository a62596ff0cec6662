//! Repository Showcase
//!
//! Lists an organization's public repositories and renders per-repository
//! detail pages from the GitHub REST API.

mod api;
mod config;
mod errors;
mod github;
mod models;
mod posts;
mod showcase;
mod web;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use github::GithubClient;
use models::PreviewSite;
use posts::{InMemoryPostStore, PostStore};
use showcase::Showcase;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub showcase: Arc<Showcase>,
    pub posts: Arc<dyn PostStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Repository Showcase");
    tracing::info!("Organization: {}", config.org);
    tracing::info!("Upstream API: {}", config.github_api_url);
    tracing::info!("Denylist: {:?}", config.denylist);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.github_token.is_none() {
        tracing::warn!("No GitHub token configured (SHOWCASE_GITHUB_TOKEN). Upstream calls are unauthenticated!");
    }

    // Upstream client and aggregation service
    let upstream = GithubClient::new(
        config.github_api_url.clone(),
        config.github_token.clone(),
        config.upstream_timeout,
    )?;
    let showcase = Arc::new(Showcase::new(
        Arc::new(upstream),
        config.org.clone(),
        config.denylist.clone(),
        PreviewSite::new(config.preview_prefix.clone(), config.preview_domain.clone()),
    ));

    // Create application state
    let state = AppState {
        showcase,
        posts: Arc::new(InMemoryPostStore::new()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Repositories
        .route("/repos", get(api::list_repos))
        .route("/repos/{repo}", get(api::get_repo_basic_info))
        .route("/repos/{repo}/readme", get(api::get_repo_readme))
        .route("/repos/{repo}/tags", get(api::get_repo_tags))
        .route("/repos/{repo}/detail", get(api::get_repo_detail))
        // Posts demo
        .route("/posts", post(api::create_post))
        .route("/posts/latest", get(api::get_latest_post))
        .fallback(api::not_found);

    // Pages
    let page_routes = Router::new()
        .route("/", get(web::home))
        .route("/assets/site.css", get(web::stylesheet))
        .route("/{repo}", get(web::repo_page));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(page_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
