//! Append-only history of everything that happens to a phone number.
//!
//! `event_date` is when the thing happened; `created_at` is when it was recorded.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    #[sea_orm(string_value = "block")]
    Block,
    #[sea_orm(string_value = "unblock")]
    Unblock,
    #[sea_orm(string_value = "restriction")]
    Restriction,
    #[sea_orm(string_value = "unrestriction")]
    Unrestriction,
    #[sea_orm(string_value = "status_change")]
    StatusChange,
    /// Daily sent-message count, carried in `message_volume`.
    #[sea_orm(string_value = "volume_record")]
    VolumeRecord,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "note")]
    Note,
    #[sea_orm(string_value = "activation")]
    Activation,
    #[sea_orm(string_value = "ip_change")]
    IpChange,
    #[sea_orm(string_value = "restart")]
    Restart,
    #[sea_orm(string_value = "user_change")]
    UserChange,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = Event)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub phone_number_id: i32,
    pub event_type: EventType,
    pub previous_status: Option<String>,
    pub new_status: Option<String>,
    pub message_volume: Option<i32>,
    pub description: Option<String>,
    /// Free-form JSON (old/new IP and similar).
    pub metadata: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub event_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
