//! HTTP endpoints over the chip store.
//!
//! Everything except the health check lives under `/api/v1`:
//! - `users` - profile and sign-in upsert
//! - `operations` - campaigns grouping numbers
//! - `phone_numbers` - number CRUD and search
//! - `analytics` - per-number stats and histories
//! - `events` - event log
//! - `tags` - tags and tag links
//! - `alarms` - restriction alarms
//! - `notifications` - in-app notifications
//! - `system_alerts` - automatic warnings
//! - `dashboard` - status breakdown
//! - `health` - `/healthz`
//! - `openapi` - OpenAPI/Utoipa configuration

pub mod alarms;
pub mod analytics;
pub mod dashboard;
pub mod events;
pub mod health;
pub mod notifications;
pub mod openapi;
pub mod operations;
pub mod phone_numbers;
pub mod system_alerts;
pub mod tags;
pub mod users;

pub use health::MISC_TAG;

use crate::AppResources;
use crate::error::{ApiError, SuccessResponse};
use crate::validation::Validate;
use axum::Json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_redoc::{Redoc, Servable};

/// Builds the full application router, including the Redoc page at `/api-docs`.
pub fn app(resources: AppResources) -> axum::Router {
    let v1 = OpenApiRouter::new()
        .merge(users::router())
        .merge(operations::router())
        .merge(phone_numbers::router())
        .merge(analytics::router())
        .merge(events::router())
        .merge(tags::router())
        .merge(alarms::router())
        .merge(notifications::router())
        .merge(system_alerts::router())
        .merge(dashboard::router());

    let (router, api) = OpenApiRouter::with_openapi(openapi::ApiDoc::openapi())
        .nest("/api/v1", v1)
        .routes(routes!(health::health))
        .layer(axum::Extension(resources))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .split_for_parts();

    router.merge(Redoc::with_url("/api-docs", api))
}

/// Starts the web server on the configured listen address.
#[tracing::instrument(skip(resources))]
pub async fn start_webserver(resources: AppResources) -> color_eyre::Result<()> {
    let addr = resources.config.listen_addr.clone();
    let router = app(resources);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        name = "api.server.listening",
        target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
        message = "Server running",
        addr = %addr
    );
    axum::serve(listener, router)
        .await
        .map_err(|e| color_eyre::Report::msg(format!("Failed to start server: {e}")))?;

    Ok(())
}

/// `None` from a lookup becomes a 404 naming what was missing.
pub(crate) fn found<T>(value: Option<T>, what: &str) -> Result<Json<T>, ApiError> {
    value
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("{what} not found")))
}

/// `None` from a write only happens without storage.
pub(crate) fn stored<T>(value: Option<T>) -> Result<Json<T>, ApiError> {
    value.map(Json).ok_or_else(ApiError::unavailable)
}

pub(crate) fn validated<T: Validate>(value: T) -> Result<T, ApiError> {
    value.validate()?;
    Ok(value)
}

pub(crate) fn success(ok: bool) -> Json<SuccessResponse> {
    SuccessResponse::new(ok)
}
