use super::ChipStore;
use crate::entity::{phone_number, restriction_alarm};
use crate::utils::double_option;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewAlarm {
    pub phone_number_id: i32,
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub restriction_start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub expected_return_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub notify_at: OffsetDateTime,
    pub notes: Option<String>,
}

/// Schedule edits. The active/notified flags are not editable here; see
/// [`ChipStore::mark_alarm_as_notified`].
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct AlarmPatch {
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub restriction_start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub expected_return_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub notify_at: Option<OffsetDateTime>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

/// An alarm together with the number it watches, if that still exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AlarmWithPhoneNumber {
    #[serde(flatten)]
    pub alarm: restriction_alarm::Model,
    pub phone_number: Option<phone_number::Model>,
}

impl ChipStore {
    /// Newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_alarms_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        restriction_alarm::Entity::find()
            .filter(restriction_alarm::Column::UserId.eq(user_id))
            .order_by_desc(restriction_alarm::Column::CreatedAt)
            .order_by_desc(restriction_alarm::Column::Id)
            .all(db)
            .await
    }

    /// Pending alarms of one user, soonest `notify_at` first.
    #[tracing::instrument(skip(self))]
    pub async fn get_active_alarms(
        &self,
        user_id: i32,
    ) -> Result<Vec<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        restriction_alarm::Entity::find()
            .filter(restriction_alarm::Column::UserId.eq(user_id))
            .filter(restriction_alarm::Column::IsActive.eq(true))
            .filter(restriction_alarm::Column::WasNotified.eq(false))
            .order_by_asc(restriction_alarm::Column::NotifyAt)
            .order_by_asc(restriction_alarm::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_alarm_by_id(
        &self,
        id: i32,
    ) -> Result<Option<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        restriction_alarm::Entity::find_by_id(id).one(db).await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id, phone_number_id = new.phone_number_id))]
    pub async fn create_alarm(
        &self,
        new: NewAlarm,
    ) -> Result<Option<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let now = OffsetDateTime::now_utc();
        restriction_alarm::ActiveModel {
            phone_number_id: Set(new.phone_number_id),
            user_id: Set(new.user_id),
            restriction_start_time: Set(new.restriction_start_time),
            expected_return_time: Set(new.expected_return_time),
            notify_at: Set(new.notify_at),
            is_active: Set(true),
            was_notified: Set(false),
            notified_at: Set(None),
            notes: Set(new.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_alarm(
        &self,
        id: i32,
        patch: AlarmPatch,
    ) -> Result<Option<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };

        let mut active = restriction_alarm::ActiveModel {
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(v) = patch.restriction_start_time {
            active.restriction_start_time = Set(v);
        }
        if let Some(v) = patch.expected_return_time {
            active.expected_return_time = Set(v);
        }
        if let Some(v) = patch.notify_at {
            active.notify_at = Set(v);
        }
        if let Some(v) = patch.notes {
            active.notes = Set(v);
        }

        restriction_alarm::Entity::update_many()
            .set(active)
            .filter(restriction_alarm::Column::Id.eq(id))
            .exec(db)
            .await?;
        restriction_alarm::Entity::find_by_id(id).one(db).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_alarm(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        restriction_alarm::Entity::delete_by_id(id).exec(db).await?;
        Ok(true)
    }

    /// Moves an alarm to its terminal state: inactive, notified, stamped.
    ///
    /// Only an alarm that has not been notified yet is touched, so repeating
    /// the call keeps the first `notified_at`.
    #[tracing::instrument(skip(self))]
    pub async fn mark_alarm_as_notified(
        &self,
        id: i32,
    ) -> Result<Option<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        self.try_mark_alarm_as_notified(id).await?;
        restriction_alarm::Entity::find_by_id(id).one(db).await
    }

    /// Same transition as [`Self::mark_alarm_as_notified`], reporting whether
    /// this call made it. `false` means the alarm is missing or was already notified.
    #[tracing::instrument(skip(self))]
    pub async fn try_mark_alarm_as_notified(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        let now = OffsetDateTime::now_utc();

        let result = restriction_alarm::Entity::update_many()
            .col_expr(restriction_alarm::Column::WasNotified, Expr::value(true))
            .col_expr(restriction_alarm::Column::NotifiedAt, Expr::value(now))
            .col_expr(restriction_alarm::Column::IsActive, Expr::value(false))
            .col_expr(restriction_alarm::Column::UpdatedAt, Expr::value(now))
            .filter(restriction_alarm::Column::Id.eq(id))
            .filter(restriction_alarm::Column::WasNotified.eq(false))
            .exec(db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(false);
        }
        tracing::info!(
            name = "store.alarm.notified",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Alarm marked as notified",
            alarm_id = id
        );
        Ok(true)
    }

    /// Pending alarms of every user whose `notify_at` is not after `now`, soonest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_alarms_to_notify(
        &self,
        now: OffsetDateTime,
    ) -> Result<Vec<restriction_alarm::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        restriction_alarm::Entity::find()
            .filter(restriction_alarm::Column::IsActive.eq(true))
            .filter(restriction_alarm::Column::WasNotified.eq(false))
            .filter(restriction_alarm::Column::NotifyAt.lte(now))
            .order_by_asc(restriction_alarm::Column::NotifyAt)
            .order_by_asc(restriction_alarm::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_alarm_with_phone_number(
        &self,
        id: i32,
    ) -> Result<Option<AlarmWithPhoneNumber>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let Some(alarm) = restriction_alarm::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let phone_number = phone_number::Entity::find_by_id(alarm.phone_number_id)
            .one(db)
            .await?;
        Ok(Some(AlarmWithPhoneNumber {
            alarm,
            phone_number,
        }))
    }
}
