use super::ChipStore;
use crate::entity::phone_number::{self, DEFAULT_RISK_SCORE, PhoneStatus, Tier};
use crate::entity::{event, phone_number_tag, restriction_alarm};
use crate::utils::{double_option, double_option_rfc3339, empty_as_none, non_empty};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DbErr, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NewPhoneNumber {
    pub number: String,
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
    pub operation_id: i32,
    pub status: Option<PhoneStatus>,
    pub operator: Option<String>,
    pub device_type: Option<String>,
    pub device: Option<String>,
    pub account_type: Option<String>,
    pub purpose: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub last_ip: Option<String>,
    pub ip_change_frequency: Option<i32>,
    pub owner: Option<String>,
    pub purchase_batch: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub activation_date: Option<OffsetDateTime>,
    pub risk_score: Option<i32>,
    pub tier: Option<Tier>,
}

/// Field mask for [`ChipStore::update_phone_number`].
///
/// Absent fields are left untouched. For nullable columns an explicit `null`
/// clears the value.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct PhoneNumberPatch {
    pub number: Option<String>,
    pub operation_id: Option<i32>,
    pub status: Option<PhoneStatus>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub operator: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub device_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub device: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub account_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub purpose: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub region: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub last_ip: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub ip_change_frequency: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub owner: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub purchase_batch: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option_rfc3339")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub activation_date: Option<Option<OffsetDateTime>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub risk_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Tier>)]
    pub tier: Option<Option<Tier>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub total_messages: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub total_blocks: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub total_restrictions: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub avg_recovery_hours: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option_rfc3339")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub last_block_date: Option<Option<OffsetDateTime>>,
    #[serde(default, deserialize_with = "double_option_rfc3339")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub last_restriction_date: Option<Option<OffsetDateTime>>,
}

impl PhoneNumberPatch {
    fn into_active_model(self, now: OffsetDateTime) -> phone_number::ActiveModel {
        let mut active = phone_number::ActiveModel {
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(v) = self.number {
            active.number = Set(v);
        }
        if let Some(v) = self.operation_id {
            active.operation_id = Set(v);
        }
        if let Some(v) = self.status {
            active.status = Set(v);
        }
        if let Some(v) = self.operator {
            active.operator = Set(v);
        }
        if let Some(v) = self.device_type {
            active.device_type = Set(v);
        }
        if let Some(v) = self.device {
            active.device = Set(v);
        }
        if let Some(v) = self.account_type {
            active.account_type = Set(v);
        }
        if let Some(v) = self.purpose {
            active.purpose = Set(v);
        }
        if let Some(v) = self.notes {
            active.notes = Set(v);
        }
        if let Some(v) = self.location {
            active.location = Set(v);
        }
        if let Some(v) = self.region {
            active.region = Set(v);
        }
        if let Some(v) = self.last_ip {
            active.last_ip = Set(v);
        }
        if let Some(v) = self.ip_change_frequency {
            active.ip_change_frequency = Set(v);
        }
        if let Some(v) = self.owner {
            active.owner = Set(v);
        }
        if let Some(v) = self.purchase_batch {
            active.purchase_batch = Set(v);
        }
        if let Some(v) = self.activation_date {
            active.activation_date = Set(v);
        }
        if let Some(v) = self.risk_score {
            active.risk_score = Set(v);
        }
        if let Some(v) = self.tier {
            active.tier = Set(v);
        }
        if let Some(v) = self.total_messages {
            active.total_messages = Set(v);
        }
        if let Some(v) = self.total_blocks {
            active.total_blocks = Set(v);
        }
        if let Some(v) = self.total_restrictions {
            active.total_restrictions = Set(v);
        }
        if let Some(v) = self.avg_recovery_hours {
            active.avg_recovery_hours = Set(v);
        }
        if let Some(v) = self.last_block_date {
            active.last_block_date = Set(v);
        }
        if let Some(v) = self.last_restriction_date {
            active.last_restriction_date = Set(v);
        }
        active
    }
}

/// Filters for [`ChipStore::search_phone_numbers`]. All present filters must match.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PhoneNumberSearch {
    /// Substring of number, device or notes.
    pub query: Option<String>,
    /// Exact operator.
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<PhoneStatus>,
    /// Substring of device.
    pub device: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub operation_id: Option<i32>,
}

impl ChipStore {
    #[tracing::instrument(skip(self))]
    pub async fn get_phone_numbers_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        phone_number::Entity::find()
            .filter(phone_number::Column::UserId.eq(user_id))
            .order_by_desc(phone_number::Column::AddedAt)
            .order_by_desc(phone_number::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_phone_numbers_by_operation_id(
        &self,
        operation_id: i32,
    ) -> Result<Vec<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        phone_number::Entity::find()
            .filter(phone_number::Column::OperationId.eq(operation_id))
            .order_by_desc(phone_number::Column::AddedAt)
            .order_by_desc(phone_number::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_phone_number_by_id(
        &self,
        id: i32,
    ) -> Result<Option<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        phone_number::Entity::find_by_id(id).one(db).await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id, operation_id = new.operation_id))]
    pub async fn create_phone_number(
        &self,
        new: NewPhoneNumber,
    ) -> Result<Option<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let now = OffsetDateTime::now_utc();
        phone_number::ActiveModel {
            number: Set(new.number),
            operator: Set(new.operator),
            device_type: Set(new.device_type),
            device: Set(new.device),
            status: Set(new.status.unwrap_or_default()),
            account_type: Set(new.account_type),
            purpose: Set(new.purpose),
            notes: Set(new.notes),
            location: Set(new.location),
            region: Set(new.region),
            last_ip: Set(new.last_ip),
            ip_change_frequency: Set(new.ip_change_frequency),
            owner: Set(new.owner),
            purchase_batch: Set(new.purchase_batch),
            activation_date: Set(new.activation_date),
            risk_score: Set(Some(new.risk_score.unwrap_or(DEFAULT_RISK_SCORE))),
            tier: Set(Some(new.tier.unwrap_or_default())),
            total_messages: Set(Some(0)),
            total_blocks: Set(Some(0)),
            total_restrictions: Set(Some(0)),
            avg_recovery_hours: Set(None),
            last_block_date: Set(None),
            last_restriction_date: Set(None),
            added_at: Set(now),
            updated_at: Set(now),
            user_id: Set(new.user_id),
            operation_id: Set(new.operation_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_phone_number(
        &self,
        id: i32,
        patch: PhoneNumberPatch,
    ) -> Result<Option<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        phone_number::Entity::update_many()
            .set(patch.into_active_model(OffsetDateTime::now_utc()))
            .filter(phone_number::Column::Id.eq(id))
            .exec(db)
            .await?;
        phone_number::Entity::find_by_id(id).one(db).await
    }

    /// Deletes the number with its events, tag links and alarms in one transaction.
    #[tracing::instrument(skip(self))]
    pub async fn delete_phone_number(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };

        let txn = db.begin().await?;
        let events = event::Entity::delete_many()
            .filter(event::Column::PhoneNumberId.eq(id))
            .exec(&txn)
            .await?;
        let links = phone_number_tag::Entity::delete_many()
            .filter(phone_number_tag::Column::PhoneNumberId.eq(id))
            .exec(&txn)
            .await?;
        let alarms = restriction_alarm::Entity::delete_many()
            .filter(restriction_alarm::Column::PhoneNumberId.eq(id))
            .exec(&txn)
            .await?;
        phone_number::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            name = "store.phone_number.deleted",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Deleted phone number and dependent rows",
            phone_number_id = id,
            events = events.rows_affected,
            tag_links = links.rows_affected,
            alarms = alarms.rows_affected
        );
        Ok(true)
    }

    /// Newest first. Empty string filters count as absent.
    #[tracing::instrument(skip(self))]
    pub async fn search_phone_numbers(
        &self,
        user_id: i32,
        search: &PhoneNumberSearch,
    ) -> Result<Vec<phone_number::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };

        let mut condition = Condition::all().add(phone_number::Column::UserId.eq(user_id));
        if let Some(query) = non_empty(search.query.as_deref()) {
            condition = condition.add(
                Condition::any()
                    .add(phone_number::Column::Number.contains(query))
                    .add(phone_number::Column::Device.contains(query))
                    .add(phone_number::Column::Notes.contains(query)),
            );
        }
        if let Some(operator) = non_empty(search.operator.as_deref()) {
            condition = condition.add(phone_number::Column::Operator.eq(operator));
        }
        if let Some(status) = search.status {
            condition = condition.add(phone_number::Column::Status.eq(status));
        }
        if let Some(device) = non_empty(search.device.as_deref()) {
            condition = condition.add(phone_number::Column::Device.contains(device));
        }
        if let Some(operation_id) = search.operation_id {
            condition = condition.add(phone_number::Column::OperationId.eq(operation_id));
        }

        phone_number::Entity::find()
            .filter(condition)
            .order_by_desc(phone_number::Column::AddedAt)
            .order_by_desc(phone_number::Column::Id)
            .all(db)
            .await
    }
}
