use super::ChipStore;
use crate::entity::notification::{self, NotificationType};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

pub const DEFAULT_NOTIFICATIONS_LIMIT: u64 = 50;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewNotification {
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
    pub phone_number_id: Option<i32>,
    pub alarm_id: Option<i32>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    /// Defaults to `true`.
    pub play_sound: Option<bool>,
}

impl ChipStore {
    /// Newest first, at most `limit` rows.
    #[tracing::instrument(skip(self))]
    pub async fn get_notifications_by_user_id(
        &self,
        user_id: i32,
        limit: u64,
    ) -> Result<Vec<notification::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_unread_notifications(
        &self,
        user_id: i32,
    ) -> Result<Vec<notification::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        notification::Entity::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id, notification_type = ?new.notification_type))]
    pub async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Option<notification::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        notification::ActiveModel {
            user_id: Set(new.user_id),
            phone_number_id: Set(new.phone_number_id),
            alarm_id: Set(new.alarm_id),
            notification_type: Set(new.notification_type),
            title: Set(new.title),
            message: Set(new.message),
            is_read: Set(false),
            play_sound: Set(new.play_sound.unwrap_or(true)),
            created_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_notification_as_read(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_notifications_as_read(&self, user_id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(db)
            .await?;
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_notification(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        notification::Entity::delete_by_id(id).exec(db).await?;
        Ok(true)
    }
}
