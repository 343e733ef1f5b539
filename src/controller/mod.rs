use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use axum::ServiceExt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use sqlx::SqlitePool;
use tower::{Layer, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;

use crate::classifier::ImageClassifier;
use crate::config::Config;
use crate::helpers::handler_404::page_not_found_handler;

pub mod api_error;
pub mod classify_controller;
pub mod health_check;
pub mod restaurant_controller;

/// Shared across every request; immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub classifier: Arc<ImageClassifier>,
    pub labels: Arc<Vec<String>>,
}

pub async fn serve(app_state: AppState, config: &Config) -> anyhow::Result<()> {
    let origins = config
        .origin_urls
        .split(',')
        .map(|s| s.trim().parse())
        .collect::<Result<Vec<HeaderValue>, _>>()
        .context("Invalid origin URL in the CORS allow-list")?;

    let application = router_endpoints(app_state)
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_origin(origins)
                    .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
            ),
        )
        .fallback(page_not_found_handler);

    // Requests with a trailing slash resolve to the same routes.
    let application = NormalizePathLayer::trim_trailing_slash().layer(application);

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.bind_addr))?;

    info!("API server listening on: {}", addr);
    axum::Server::bind(&addr)
        .serve(application.into_make_service())
        .await
        .context("Error spinning up the API server")
}

pub fn router_endpoints(app_state: AppState) -> Router {
    restaurant_controller::router(app_state.pool.clone())
        .merge(classify_controller::router(app_state))
        .merge(health_check::router())
}
