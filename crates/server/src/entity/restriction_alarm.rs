//! One alarm per restriction episode.
//!
//! An alarm starts active and unnotified. [`crate::store::ChipStore::mark_alarm_as_notified`]
//! moves it to inactive and notified; that state is terminal.

use sea_orm::entity::prelude::*;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = RestrictionAlarm)]
#[sea_orm(table_name = "restriction_alarms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub phone_number_id: i32,
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub restriction_start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expected_return_time: OffsetDateTime,
    /// Expected to be <= `expected_return_time`, not enforced.
    #[serde(with = "time::serde::rfc3339")]
    pub notify_at: OffsetDateTime,
    pub is_active: bool,
    pub was_notified: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub notified_at: Option<OffsetDateTime>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Model {
    /// Still waiting in the notification queue.
    pub fn is_pending(&self) -> bool {
        self.is_active && !self.was_notified
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
