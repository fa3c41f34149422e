pub mod api;
pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod hosts;
pub mod migration;
pub mod queries;
pub mod slugify;

use std::sync::Arc;

use poem::endpoint::StaticFilesEndpoint;
use poem::middleware::{Cors, NormalizePath, TrailingSlash};
use poem::{Endpoint, EndpointExt, Route};
use poem_openapi::OpenApiService;
use sea_orm::DatabaseConnection;

use crate::api::{AccountsApi, BlogApi, MediaApi};
use crate::config::AppConfig;
use crate::hosts::AllowedHosts;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
}

/// Assembles the full application endpoint; shared by `main` and the
/// integration tests.
pub fn build_app(state: AppState) -> impl Endpoint {
    let config = state.config.clone();
    let state = Arc::new(state);

    let api_service = OpenApiService::new(
        (
            BlogApi::new(state.clone()),
            AccountsApi::new(state.clone()),
            MediaApi::new(state),
        ),
        "Blog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server("/");

    let mut route = Route::new();
    if config.debug {
        route = route.nest("/docs", api_service.swagger_ui());
    }
    route
        .nest("/media", StaticFilesEndpoint::new(config.media_root.clone()))
        .nest("/static", StaticFilesEndpoint::new(config.static_root.clone()))
        .nest("/", api_service)
        // poem-openapi drops the trailing slash from `#[oai(path = "…/")]`
        // at registration, so trim it from incoming requests to match.
        .with(NormalizePath::new(TrailingSlash::Trim))
        .with(AllowedHosts::new(config.allowed_hosts.clone()))
        .with(Cors::new())
        .data(config)
}
