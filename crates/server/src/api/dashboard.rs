//! Dashboard endpoint.

use crate::AppResources;
use crate::error::ApiError;
use crate::stats::DashboardStats;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

pub const DASHBOARD_TAG: &str = "Dashboard";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
struct DashboardParams {
    /// Restrict the breakdown to one operation.
    operation_id: Option<i32>,
}

pub fn router() -> OpenApiRouter {
    OpenApiRouter::new().routes(routes!(get_dashboard))
}

#[tracing::instrument(skip(resources))]
#[utoipa::path(
    get,
    path = "/users/{user_id}/dashboard",
    tag = DASHBOARD_TAG,
    operation_id = "Get Dashboard",
    description = "Every number of the user (or operation) appears in exactly one status bucket.",
    params(("user_id" = i32, Path, description = "Owner"), DashboardParams),
    responses((status = 200, description = "Status breakdown", body = DashboardStats))
)]
async fn get_dashboard(
    Extension(resources): Extension<AppResources>,
    Path(user_id): Path<i32>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardStats>, ApiError> {
    Ok(Json(
        resources
            .store
            .get_dashboard_stats(user_id, params.operation_id)
            .await?,
    ))
}
