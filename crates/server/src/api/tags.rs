//! Tag and tag link endpoints.

use super::{stored, success, validated};
use crate::AppResources;
use crate::entity::tag;
use crate::error::{ApiError, SuccessResponse};
use crate::store::NewTag;
use axum::{Extension, Json, extract::Path};
use utoipa_axum::{router::OpenApiRouter, routes};

pub const TAGS_TAG: &str = "Tags";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(list_tags, create_tag))
        .routes(routes!(delete_tag))
        .routes(routes!(list_phone_number_tags))
        .routes(routes!(add_tag_to_phone_number, remove_tag_from_phone_number))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/tags",
    tag = TAGS_TAG,
    operation_id = "List Tags",
    params(("user_id" = i32, Path, description = "Owner")),
    responses((status = 200, description = "Tags ordered by name", body = Vec<tag::Model>))
)]
async fn list_tags(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<tag::Model>>, ApiError> {
    Ok(Json(resources.store.get_tags_by_user_id(user_id).await?))
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    post,
    path = "/users/{user_id}/tags",
    tag = TAGS_TAG,
    operation_id = "Create Tag",
    params(("user_id" = i32, Path, description = "Owner")),
    request_body = NewTag,
    responses(
        (status = 200, description = "The created tag", body = tag::Model),
        (status = 400, description = "Invalid name or colour", body = ApiError)
    )
)]
async fn create_tag(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(mut payload): Json<NewTag>,
) -> Result<Json<tag::Model>, ApiError> {
    payload.user_id = user_id;
    stored(resources.store.create_tag(validated(payload)?).await?)
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/tags/{id}",
    tag = TAGS_TAG,
    operation_id = "Delete Tag",
    description = "Removes the tag from every number it was linked to.",
    params(("id" = i32, Path, description = "Tag id")),
    responses((status = 200, description = "Deletion result", body = SuccessResponse))
)]
async fn delete_tag(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(resources.store.delete_tag(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/phone-numbers/{id}/tags",
    tag = TAGS_TAG,
    operation_id = "List Phone Number Tags",
    params(("id" = i32, Path, description = "Phone number id")),
    responses((status = 200, description = "Linked tags ordered by name", body = Vec<tag::Model>))
)]
async fn list_phone_number_tags(
    Extension(resources): Extension<AppResources>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<tag::Model>>, ApiError> {
    Ok(Json(resources.store.get_tags_for_phone_number(id).await?))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    put,
    path = "/phone-numbers/{id}/tags/{tag_id}",
    tag = TAGS_TAG,
    operation_id = "Add Tag To Phone Number",
    params(
        ("id" = i32, Path, description = "Phone number id"),
        ("tag_id" = i32, Path, description = "Tag id")
    ),
    responses((status = 200, description = "Link result", body = SuccessResponse))
)]
async fn add_tag_to_phone_number(
    Extension(resources): Extension<AppResources>,
    Path((id, tag_id)): Path<(i32, i32)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(
        resources.store.add_tag_to_phone_number(id, tag_id).await?,
    ))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    delete,
    path = "/phone-numbers/{id}/tags/{tag_id}",
    tag = TAGS_TAG,
    operation_id = "Remove Tag From Phone Number",
    params(
        ("id" = i32, Path, description = "Phone number id"),
        ("tag_id" = i32, Path, description = "Tag id")
    ),
    responses((status = 200, description = "Unlink result", body = SuccessResponse))
)]
async fn remove_tag_from_phone_number(
    Extension(resources): Extension<AppResources>,
    Path((id, tag_id)): Path<(i32, i32)>,
) -> Result<Json<SuccessResponse>, ApiError> {
    Ok(success(
        resources
            .store
            .remove_tag_from_phone_number(id, tag_id)
            .await?,
    ))
}
