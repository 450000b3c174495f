//! User profile endpoints.

use super::{found, stored, validated};
use crate::AppResources;
use crate::entity::user;
use crate::error::ApiError;
use crate::store::{NewUser, UserProfilePatch};
use axum::{Extension, Json, extract::Path};
use utoipa_axum::{router::OpenApiRouter, routes};

pub const USERS_TAG: &str = "Users";

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(upsert_user))
        .routes(routes!(get_user, update_user_profile))
}

#[tracing::instrument(skip(resources, payload), fields(open_id = %payload.open_id))]
#[utoipa::path(
    post,
    path = "/users",
    tag = USERS_TAG,
    operation_id = "Upsert User",
    summary = "Record a sign-in",
    description = "Creates the user on first sign-in, otherwise refreshes `last_signed_in` and any identity fields given.",
    request_body = NewUser,
    responses(
        (status = 200, description = "The stored user", body = user::Model),
        (status = 400, description = "Missing open_id", body = ApiError)
    )
)]
async fn upsert_user(
    Extension(resources): Extension<AppResources>,
    Json(payload): Json<NewUser>,
) -> Result<Json<user::Model>, ApiError> {
    if payload.open_id.trim().is_empty() {
        return Err(ApiError::bad_request("open_id must not be empty"));
    }
    stored(resources.store.upsert_user(payload).await?)
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = USERS_TAG,
    operation_id = "Get User",
    params(("user_id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = user::Model),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
async fn get_user(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
) -> Result<Json<user::Model>, ApiError> {
    found(resources.store.get_user_by_id(user_id).await?, "User")
}

#[tracing::instrument(skip(resources, payload))]
#[utoipa::path(
    patch,
    path = "/users/{user_id}",
    tag = USERS_TAG,
    operation_id = "Update User Profile",
    params(("user_id" = i32, Path, description = "User id")),
    request_body = UserProfilePatch,
    responses(
        (status = 200, description = "The updated user", body = user::Model),
        (status = 400, description = "Invalid field", body = ApiError),
        (status = 404, description = "No such user", body = ApiError)
    )
)]
async fn update_user_profile(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Json(payload): Json<UserProfilePatch>,
) -> Result<Json<user::Model>, ApiError> {
    let patch = validated(payload)?;
    found(
        resources.store.update_user_profile(user_id, patch).await?,
        "User",
    )
}
