//! Phone number endpoints.

use super::{found, stored, success, validated};
use crate::AppResources;
use crate::entity::phone_number;
use crate::error::{ApiError, SuccessResponse};
use crate::store::{NewPhoneNumber, PhoneNumberPatch, PhoneNumberSearch};
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use utoipa_axum::{router::OpenApiRouter, routes};

pub const PHONE_NUMBERS_TAG: &str = "Phone Numbers";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(search_phone_numbers, create_phone_number))
        .routes(routes!(
            get_phone_number,
            update_phone_number,
            delete_phone_number
        ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/phone-numbers",
    tag = PHONE_NUMBERS_TAG,
    operation_id = "Search Phone Numbers",
    summary = "List or search a user's numbers",
    description = "Without filters this lists every number of the user. Each filter given narrows the \
                   result; empty values are ignored. Newest first.",
    params(("user_id" = i32, Path, description = "Owner"), PhoneNumberSearch),
    responses((status = 200, description = "Matching numbers", body = Vec<phone_number::Model>))
)]
async fn search_phone_numbers(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Query(search): Query<PhoneNumberSearch>,
) -> Result<Json<Vec<phone_number::Model>>, ApiError> {
    Ok(Json(
        resources
            .store
            .search_phone_numbers(user_id, &search)
            .await?,
    ))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/phone-numbers",
    tag = PHONE_NUMBERS_TAG,
    operation_id = "Create Phone Number",
    description = "Status defaults to `unknown`, tier to `B` and risk score to 50.",
    params(("user_id" = i32, Path, description = "Owner")),
    request_body = NewPhoneNumber,
    responses(
        (status = 200, description = "The created number", body = phone_number::Model),
        (status = 400, description = "Invalid number or risk score", body = ApiError)
    )
)]
async fn create_phone_number(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewPhoneNumber>,
) -> Result<Json<phone_number::Model>, ApiError> {
    payload.user_id = user_id;
    stored(
        resources
            .store
            .create_phone_number(validated(payload)?)
            .await?,
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}",
    tag = PHONE_NUMBERS_TAG,
    operation_id = "Get Phone Number",
    params(("id" = i32, Path, description = "Phone number id")),
    responses(
        (status = 200, description = "The number", body = phone_number::Model),
        (status = 404, description = "No such number", body = ApiError)
    )
)]
async fn get_phone_number(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<phone_number::Model>, ApiError> {
    found(
        resources.store.get_phone_number_by_id(id).await?,
        "Phone number",
    )
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    patch,
    path = "/phone-numbers/{id}",
    tag = PHONE_NUMBERS_TAG,
    operation_id = "Update Phone Number",
    description = "Only fields present in the body change. `null` clears a nullable field.",
    params(("id" = i32, Path, description = "Phone number id")),
    request_body = PhoneNumberPatch,
    responses(
        (status = 200, description = "The updated number", body = phone_number::Model),
        (status = 400, description = "Invalid field", body = ApiError),
        (status = 404, description = "No such number", body = ApiError)
    )
)]
async fn update_phone_number(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
    Json(payload): Json<PhoneNumberPatch>,
) -> Result<Json<phone_number::Model>, ApiError> {
    let patch = validated(payload)?;
    found(
        resources.store.update_phone_number(id, patch).await?,
        "Phone number",
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/phone-numbers/{id}",
    tag = PHONE_NUMBERS_TAG,
    operation_id = "Delete Phone Number",
    description = "Also removes the number's events, tag links and alarms, all or nothing.",
    params(("id" = i32, Path, description = "Phone number id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_phone_number(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_phone_number(id).await?))
}
