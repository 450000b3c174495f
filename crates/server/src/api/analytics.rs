//! Per-number statistics derived from the event log.

use crate::AppResources;
use crate::entity::event;
use crate::error::ApiError;
use crate::stats::PhoneNumberStats;
use crate::store::DEFAULT_VOLUME_HISTORY_DAYS;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const ANALYTICS_TAG: &str = "Analytics";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct VolumeHistoryParams {
    /// Window size in days, default 30.
    days: Option<u32>,
}

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(get_phone_number_stats))
        .routes(routes!(get_volume_history))
        .routes(routes!(get_status_history))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}/stats",
    tag = ANALYTICS_TAG,
    operation_id = "Get Phone Number Stats",
    description = "Block and restriction counts, average recovery time in hours (null if no block \
                   was ever lifted), highest daily volume and total event count.",
    params(("id" = i32, Path, description = "Phone number id")),
    responses((status = 200, description = "Statistics", body = PhoneNumberStats))
)]
async fn get_phone_number_stats(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<PhoneNumberStats>, ApiError> {
    Ok(Json(resources.store.get_phone_number_stats(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}/volume-history",
    tag = ANALYTICS_TAG,
    operation_id = "Get Volume History",
    params(("id" = i32, Path, description = "Phone number id"), VolumeHistoryParams),
    responses((status = 200, description = "Volume records in the window, oldest first", body = Vec<event::Model>))
)]
async fn get_volume_history(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
    Query(params): Query<VolumeHistoryParams>,
) -> Result<Json<Vec<event::Model>>, ApiError> {
    let days = params.days.unwrap_or(DEFAULT_VOLUME_HISTORY_DAYS);
    Ok(Json(resources.store.get_volume_history(id, days).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}/status-history",
    tag = ANALYTICS_TAG,
    operation_id = "Get Status History",
    params(("id" = i32, Path, description = "Phone number id")),
    responses((status = 200, description = "Status changes, oldest first", body = Vec<event::Model>))
)]
async fn get_status_history(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<event::Model>>, ApiError> {
    Ok(Json(resources.store.get_status_history(id).await?))
}
