//! System alert endpoints.

use super::{found, stored, success, validated};
use crate::AppResources;
use crate::entity::system_alert;
use crate::error::{ApiError, SuccessResponse};
use crate::store::NewSystemAlert;
use axum::{Extension, Json, extract::Path};
use utoipa_axum::{router::OpenApiRouter, routes};

pub const SYSTEM_ALERTS_TAG: &str = "System Alerts";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_system_alerts, create_system_alert))
        .routes(routes!(list_unresolved_system_alerts))
        .routes(routes!(resolve_system_alert))
        .routes(routes!(delete_system_alert))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/system-alerts",
    tag = SYSTEM_ALERTS_TAG,
    operation_id = "List System Alerts",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "Alerts, newest first", body = Vec<system_alert::Model>))
)]
async fn list_system_alerts(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<system_alert::Model>>, ApiError> {
    Ok(Json(
        resources.store.get_system_alerts_by_user_id(user_id).await?,
    ))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/system-alerts",
    tag = SYSTEM_ALERTS_TAG,
    operation_id = "Create System Alert",
    description = "Severity defaults to `medium`.",
    params(("user_id" = i32, Path, description = "Owner")),
    request_body = NewSystemAlert,
    responses(
        (status = 200, description = "The created alert", body = system_alert::Model),
        (status = 400, description = "Missing title or message", body = ApiError)
    )
)]
async fn create_system_alert(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewSystemAlert>,
) -> Result<Json<system_alert::Model>, ApiError> {
    payload.user_id = user_id;
    stored(
        resources
            .store
            .create_system_alert(validated(payload)?)
            .await?,
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/system-alerts/unresolved",
    tag = SYSTEM_ALERTS_TAG,
    operation_id = "List Unresolved System Alerts",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "Open alerts, newest first", body = Vec<system_alert::Model>))
)]
async fn list_unresolved_system_alerts(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<system_alert::Model>>, ApiError> {
    Ok(Json(
        resources.store.get_unresolved_system_alerts(user_id).await?,
    ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    post,
    path = "/system-alerts/{id}/resolve",
    tag = SYSTEM_ALERTS_TAG,
    operation_id = "Resolve System Alert",
    params(("id" = i32, Path, description = "Alert id")),
    responses(
        (status = 200, description = "The resolved alert", body = system_alert::Model),
        (status = 404, description = "No such alert", body = ApiError)
    )
)]
async fn resolve_system_alert(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<system_alert::Model>, ApiError> {
    found(
        resources.store.resolve_system_alert(id).await?,
        "System alert",
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/system-alerts/{id}",
    tag = SYSTEM_ALERTS_TAG,
    operation_id = "Delete System Alert",
    params(("id" = i32, Path, description = "Alert id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_system_alert(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_system_alert(id).await?))
}
