//! OpenAPI/Utoipa configuration.

use crate::api::{
    MISC_TAG, alarms::ALARMS_TAG, analytics::ANALYTICS_TAG, dashboard::DASHBOARD_TAG,
    events::EVENTS_TAG, notifications::NOTIFICATIONS_TAG, operations::OPERATIONS_TAG,
    phone_numbers::PHONE_NUMBERS_TAG, system_alerts::SYSTEM_ALERTS_TAG, tags::TAGS_TAG,
    users::USERS_TAG,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chip Tracker API",
        version = "1.0.0",
        description = "Track phone numbers, their event history, restriction alarms and notifications."
    ),
    tags(
        (name = MISC_TAG, description = "Miscellaneous endpoints"),
        (name = USERS_TAG, description = "User profiles"),
        (name = OPERATIONS_TAG, description = "Operations grouping phone numbers"),
        (name = PHONE_NUMBERS_TAG, description = "Phone number management and search"),
        (name = ANALYTICS_TAG, description = "Statistics derived from the event log"),
        (name = EVENTS_TAG, description = "Phone number event log"),
        (name = TAGS_TAG, description = "Tags and tag links"),
        (name = ALARMS_TAG, description = "Restriction alarms"),
        (name = NOTIFICATIONS_TAG, description = "In-app notifications"),
        (name = SYSTEM_ALERTS_TAG, description = "Automatic system alerts"),
        (name = DASHBOARD_TAG, description = "Dashboard aggregation")
    )
)]
pub struct ApiDoc;
