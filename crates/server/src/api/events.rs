//! Event log endpoints.

use super::{stored, success};
use crate::AppResources;
use crate::entity::event;
use crate::error::{ApiError, SuccessResponse};
use crate::store::{DEFAULT_RECENT_EVENTS_LIMIT, NewEvent};
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const EVENTS_TAG: &str = "Events";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct LimitParams {
    /// Maximum number of events, default 50.
    limit: Option<u64>,
}

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_events, create_event))
        .routes(routes!(recent_events))
        .routes(routes!(delete_event))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}/events",
    tag = EVENTS_TAG,
    operation_id = "List Events",
    params(("id" = i32, Path, description = "Phone number id")),
    responses((status = 200, description = "Events, most recent first", body = Vec<event::Model>))
)]
async fn list_events(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<event::Model>>, ApiError> {
    Ok(Json(resources.store.get_events_by_phone_number_id(id).await?))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/phone-numbers/{id}/events",
    tag = EVENTS_TAG,
    operation_id = "Create Event",
    description = "`event_date` defaults to the time of recording.",
    params(("id" = i32, Path, description = "Phone number id")),
    request_body = NewEvent,
    responses((status = 200, description = "The recorded event", body = event::Model))
)]
async fn create_event(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
    Json(mut payload): Json<NewEvent>,
) -> Result<Json<event::Model>, ApiError> {
    payload.phone_number_id = id;
    stored(resources.store.create_event(payload).await?)
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/events/recent",
    tag = EVENTS_TAG,
    operation_id = "Recent Events",
    params(LimitParams),
    responses((status = 200, description = "Latest events across all numbers", body = Vec<event::Model>))
)]
async fn recent_events(
    Extension(resources): Extension<AppResources>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<event::Model>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_EVENTS_LIMIT);
    Ok(Json(resources.store.get_recent_events(limit).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = EVENTS_TAG,
    operation_id = "Delete Event",
    params(("id" = i32, Path, description = "Event id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_event(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_event(id).await?))
}
