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
pub enum NotificationType {
    /// A restricted number reached its expected return time.
    #[sea_orm(string_value = "restriction_return")]
    RestrictionReturn,
    #[sea_orm(string_value = "block_alert")]
    BlockAlert,
    #[sea_orm(string_value = "status_change")]
    StatusChange,
    #[sea_orm(string_value = "system")]
    System,
    #[sea_orm(string_value = "ip_repeated")]
    IpRepeated,
    #[serde(rename = "inactive_48h")]
    #[sea_orm(string_value = "inactive_48h")]
    Inactive48h,
    #[sea_orm(string_value = "high_volume")]
    HighVolume,
    #[sea_orm(string_value = "risk_alert")]
    RiskAlert,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = Notification)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub phone_number_id: Option<i32>,
    pub alarm_id: Option<i32>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub play_sound: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
