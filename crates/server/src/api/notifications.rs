//! Notification endpoints.

use super::{stored, success, validated};
use crate::AppResources;
use crate::entity::notification;
use crate::error::{ApiError, SuccessResponse};
use crate::store::{DEFAULT_NOTIFICATIONS_LIMIT, NewNotification};
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const NOTIFICATIONS_TAG: &str = "Notifications";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct LimitParams {
    /// Maximum number of notifications, default 50.
    limit: Option<u64>,
}

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_notifications, create_notification))
        .routes(routes!(list_unread_notifications))
        .routes(routes!(mark_all_notifications_as_read))
        .routes(routes!(mark_notification_as_read))
        .routes(routes!(delete_notification))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/notifications",
    tag = NOTIFICATIONS_TAG,
    operation_id = "List Notifications",
    params(("user_id" = i32, Path, description = "Recipient"), LimitParams),
    responses((status = 200, description = "Notifications, newest first", body = Vec<notification::Model>))
)]
async fn list_notifications(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<notification::Model>>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_NOTIFICATIONS_LIMIT);
    Ok(Json(
        resources
            .store
            .get_notifications_by_user_id(user_id, limit)
            .await?,
    ))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/notifications",
    tag = NOTIFICATIONS_TAG,
    operation_id = "Create Notification",
    params(("user_id" = i32, Path, description = "Recipient")),
    request_body = NewNotification,
    responses(
        (status = 200, description = "The created notification", body = notification::Model),
        (status = 400, description = "Missing title or message", body = ApiError)
    )
)]
async fn create_notification(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewNotification>,
) -> Result<Json<notification::Model>, ApiError> {
    payload.user_id = user_id;
    stored(
        resources
            .store
            .create_notification(validated(payload)?)
            .await?,
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/notifications/unread",
    tag = NOTIFICATIONS_TAG,
    operation_id = "List Unread Notifications",
    params(("user_id" = i32, Path, description = "Recipient")),
    responses((status = 200, description = "Unread notifications, newest first", body = Vec<notification::Model>))
)]
async fn list_unread_notifications(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<notification::Model>>, ApiError> {
    Ok(Json(
        resources.store.get_unread_notifications(user_id).await?,
    ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/notifications/read-all",
    tag = NOTIFICATIONS_TAG,
    operation_id = "Mark All Notifications As Read",
    params(("user_id" = i32, Path, description = "Recipient")),
    responses((status = 200, description = "Update result", body = SuccessResponse))
)]
async fn mark_all_notifications_as_read(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(
        resources
            .store
            .mark_all_notifications_as_read(user_id)
            .await?,
    ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = NOTIFICATIONS_TAG,
    operation_id = "Mark Notification As Read",
    params(("id" = i32, Path, description = "Notification id")),
    responses((status = 200, description = "Update result", body = SuccessResponse))
)]
async fn mark_notification_as_read(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.mark_notification_as_read(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/notifications/{id}",
    tag = NOTIFICATIONS_TAG,
    operation_id = "Delete Notification",
    params(("id" = i32, Path, description = "Notification id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_notification(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_notification(id).await?))
}
