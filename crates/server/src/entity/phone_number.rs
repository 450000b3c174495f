//! A tracked line ("chip").
//!
//! The `total_*` and `avg_recovery_hours` columns are informational caches
//! written by whoever manages the number. They are not kept in sync with the
//! event log; authoritative figures come from [`crate::stats`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Lifecycle status of a line.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum PhoneStatus {
    #[sea_orm(string_value = "active")]
    Active,
    /// Trust-building period before full use.
    #[sea_orm(string_value = "warming")]
    Warming,
    #[sea_orm(string_value = "blocked")]
    Blocked,
    #[sea_orm(string_value = "analysis")]
    Analysis,
    #[sea_orm(string_value = "off")]
    Off,
    /// Temporary platform limitation short of a block.
    #[sea_orm(string_value = "restricted")]
    Restricted,
    #[default]
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

impl std::str::FromStr for PhoneStatus {
    type Err = DbErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_value(&s.to_string())
    }
}

/// Coarse quality ranking, `S` best and `D` worst.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Tier {
    #[sea_orm(string_value = "S")]
    S,
    #[sea_orm(string_value = "A")]
    A,
    #[default]
    #[sea_orm(string_value = "B")]
    B,
    #[sea_orm(string_value = "C")]
    C,
    #[sea_orm(string_value = "D")]
    D,
}

/// Risk score stored for new numbers when none is given (0 safe, 100 high risk).
pub const DEFAULT_RISK_SCORE: i32 = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = PhoneNumber)]
#[sea_orm(table_name = "phone_numbers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub number: String,
    pub operator: Option<String>,
    pub device_type: Option<String>,
    pub device: Option<String>,
    pub status: PhoneStatus,
    pub account_type: Option<String>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub last_ip: Option<String>,
    /// Hours between IP changes.
    pub ip_change_frequency: Option<i32>,
    pub owner: Option<String>,
    pub purchase_batch: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub activation_date: Option<OffsetDateTime>,
    pub risk_score: Option<i32>,
    pub tier: Option<Tier>,
    pub total_messages: Option<i32>,
    pub total_blocks: Option<i32>,
    pub total_restrictions: Option<i32>,
    pub avg_recovery_hours: Option<i32>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_block_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_restriction_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub added_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub user_id: i32,
    pub operation_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
