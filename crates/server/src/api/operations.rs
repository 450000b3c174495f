//! Operation endpoints.

use super::{found, stored, success, validated};
use crate::AppResources;
use crate::entity::{operation, phone_number};
use crate::error::{ApiError, SuccessResponse};
use crate::store::{NewOperation, OperationPatch};
use axum::{Extension, Json, extract::Path};
use utoipa_axum::{router::OpenApiRouter, routes};

pub const OPERATIONS_TAG: &str = "Operations";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_operations, create_operation))
        .routes(routes!(get_operation, update_operation, delete_operation))
        .routes(routes!(list_operation_phone_numbers))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/operations",
    tag = OPERATIONS_TAG,
    operation_id = "List Operations",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "Operations, newest first", body = Vec<operation::Model>))
)]
async fn list_operations(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<operation::Model>>, ApiError> {
    Ok(Json(resources.store.get_operations_by_user_id(user_id).await?))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/operations",
    tag = OPERATIONS_TAG,
    operation_id = "Create Operation",
    params(("user_id" = i32, Path, description = "Owner")),
    request_body = NewOperation,
    responses(
        (status = 200, description = "The created operation", body = operation::Model),
        (status = 400, description = "Invalid name", body = ApiError)
    )
)]
async fn create_operation(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewOperation>,
) -> Result<Json<operation::Model>, ApiError> {
    payload.user_id = user_id;
    stored(resources.store.create_operation(validated(payload)?).await?)
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/operations/{id}",
    tag = OPERATIONS_TAG,
    operation_id = "Get Operation",
    params(("id" = i32, Path, description = "Operation id")),
    responses(
        (status = 200, description = "The operation", body = operation::Model),
        (status = 404, description = "No such operation", body = ApiError)
    )
)]
async fn get_operation(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<operation::Model>, ApiError> {
    found(resources.store.get_operation_by_id(id).await?, "Operation")
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    patch,
    path = "/operations/{id}",
    tag = OPERATIONS_TAG,
    operation_id = "Update Operation",
    params(("id" = i32, Path, description = "Operation id")),
    request_body = OperationPatch,
    responses(
        (status = 200, description = "The updated operation", body = operation::Model),
        (status = 400, description = "Invalid name", body = ApiError),
        (status = 404, description = "No such operation", body = ApiError)
    )
)]
async fn update_operation(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
    Json(payload): Json<OperationPatch>,
) -> Result<Json<operation::Model>, ApiError> {
    let patch = validated(payload)?;
    found(
        resources.store.update_operation(id, patch).await?,
        "Operation",
    )
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/operations/{id}",
    tag = OPERATIONS_TAG,
    operation_id = "Delete Operation",
    description = "Deletes the operation only. Its phone numbers keep their `operation_id`.",
    params(("id" = i32, Path, description = "Operation id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_operation(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_operation(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/operations/{id}/phone-numbers",
    tag = OPERATIONS_TAG,
    operation_id = "List Operation Phone Numbers",
    params(("id" = i32, Path, description = "Operation id")),
    responses((status = 200, description = "Numbers in the operation, newest first", body = Vec<phone_number::Model>))
)]
async fn list_operation_phone_numbers(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<phone_number::Model>>, ApiError> {
    Ok(Json(
        resources.store.get_phone_numbers_by_operation_id(id).await?,
    ))
}
