//! Restriction alarm endpoints.

use super::{found, stored, success};
use crate::AppResources;
use crate::entity::restriction_alarm;
use crate::error::{ApiError, SuccessResponse};
use crate::store::{AlarmPatch, AlarmWithPhoneNumber, NewAlarm};
use axum::{Extension, Json, extract::Path};
use time::OffsetDateTime;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const ALARMS_TAG: &str = "Alarms";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_alarms, create_alarm))
        .routes(routes!(list_active_alarms))
        .routes(routes!(list_due_alarms))
        .routes(routes!(get_alarm, update_alarm, delete_alarm))
        .routes(routes!(get_alarm_details))
        .routes(routes!(mark_alarm_as_notified))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/alarms",
    tag = ALARMS_TAG,
    operation_id = "List Alarms",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "All alarms, newest first", body = Vec<restriction_alarm::Model>))
)]
async fn list_alarms(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<restriction_alarm::Model>>, ApiError> {
    Ok(Json(resources.store.get_alarms_by_user_id(user_id).await?))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/alarms",
    tag = ALARMS_TAG,
    operation_id = "Create Alarm",
    description = "New alarms start active and not yet notified.",
    params(("user_id" = i32, Path, description = "Owner")),
    request_body = NewAlarm,
    responses((status = 200, description = "The created alarm", body = restriction_alarm::Model))
)]
async fn create_alarm(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewAlarm>,
) -> Result<Json<restriction_alarm::Model>, ApiError> {
    payload.user_id = user_id;
    stored(resources.store.create_alarm(payload).await?)
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/alarms/active",
    tag = ALARMS_TAG,
    operation_id = "List Active Alarms",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "Pending alarms, soonest first", body = Vec<restriction_alarm::Model>))
)]
async fn list_active_alarms(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<restriction_alarm::Model>>, ApiError> {
    Ok(Json(resources.store.get_active_alarms(user_id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/alarms/due",
    tag = ALARMS_TAG,
    operation_id = "List Due Alarms",
    description = "Pending alarms of all users whose `notify_at` has passed.",
    responses((status = 200, description = "Due alarms, soonest first", body = Vec<restriction_alarm::Model>))
)]
async fn list_due_alarms(
    Extension(resources): Extension<AppResources>,
) -> Result<Json<Vec<restriction_alarm::Model>>, ApiError> {
    Ok(Json(
        resources
            .store
            .get_alarms_to_notify(OffsetDateTime::now_utc())
            .await?,
    ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/alarms/{id}",
    tag = ALARMS_TAG,
    operation_id = "Get Alarm",
    params(("id" = i32, Path, description = "Alarm id")),
    responses(
        (status = 200, description = "The alarm", body = restriction_alarm::Model),
        (status = 404, description = "No such alarm", body = ApiError)
    )
)]
async fn get_alarm(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<restriction_alarm::Model>, ApiError> {
    found(resources.store.get_alarm_by_id(id).await?, "Alarm")
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    patch,
    path = "/alarms/{id}",
    tag = ALARMS_TAG,
    operation_id = "Update Alarm",
    params(("id" = i32, Path, description = "Alarm id")),
    request_body = AlarmPatch,
    responses(
        (status = 200, description = "The updated alarm", body = restriction_alarm::Model),
        (status = 404, description = "No such alarm", body = ApiError)
    )
)]
async fn update_alarm(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
    Json(payload): Json<AlarmPatch>,
) -> Result<Json<restriction_alarm::Model>, ApiError> {
    found(resources.store.update_alarm(id, payload).await?, "Alarm")
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/alarms/{id}",
    tag = ALARMS_TAG,
    operation_id = "Delete Alarm",
    params(("id" = i32, Path, description = "Alarm id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_alarm(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_alarm(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/alarms/{id}/details",
    tag = ALARMS_TAG,
    operation_id = "Get Alarm With Phone Number",
    params(("id" = i32, Path, description = "Alarm id")),
    responses(
        (status = 200, description = "The alarm and its number", body = AlarmWithPhoneNumber),
        (status = 404, description = "No such alarm", body = ApiError)
    )
)]
async fn get_alarm_details(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<AlarmWithPhoneNumber>, ApiError> {
    found(
        resources.store.get_alarm_with_phone_number(id).await?,
        "Alarm",
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    post,
    path = "/alarms/{id}/notified",
    tag = ALARMS_TAG,
    operation_id = "Mark Alarm As Notified",
    description = "Deactivates the alarm and stamps `notified_at`. Repeating the call changes nothing.",
    params(("id" = i32, Path, description = "Alarm id")),
    responses(
        (status = 200, description = "The notified alarm", body = restriction_alarm::Model),
        (status = 404, description = "No such alarm", body = ApiError)
    )
)]
async fn mark_alarm_as_notified(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<restriction_alarm::Model>, ApiError> {
    found(resources.store.mark_alarm_as_notified(id).await?, "Alarm")
}
