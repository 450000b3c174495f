use super::ChipStore;
use crate::entity::event::{self, EventType};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Page size used by [`ChipStore::get_recent_events`] when the caller gives none.
pub const DEFAULT_RECENT_EVENTS_LIMIT: u64 = 50;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewEvent {
    /// Filled from the request path by the API.
    #[serde(default)]
    pub phone_number_id: i32,
    pub event_type: EventType,
    pub previous_status: Option<String>,
    pub new_status: Option<String>,
    pub message_volume: Option<i32>,
    pub description: Option<String>,
    /// Free-form JSON text, stored as given.
    pub metadata: Option<String>,
    /// When the event happened. Defaults to the time of recording.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub event_date: Option<OffsetDateTime>,
}

impl NewEvent {
    pub fn new(phone_number_id: i32, event_type: EventType) -> Self {
        Self {
            phone_number_id,
            event_type,
            previous_status: None,
            new_status: None,
            message_volume: None,
            description: None,
            metadata: None,
            event_date: None,
        }
    }
}

impl ChipStore {
    /// Most recent `event_date` first.
    #[tracing::instrument(skip(self))]
    pub async fn get_events_by_phone_number_id(
        &self,
        phone_number_id: i32,
    ) -> Result<Vec<event::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .order_by_desc(event::Column::EventDate)
            .order_by_desc(event::Column::Id)
            .all(db)
            .await
    }

    /// Latest events across every number, most recent first.
    #[tracing::instrument(skip(self))]
    pub async fn get_recent_events(&self, limit: u64) -> Result<Vec<event::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        event::Entity::find()
            .order_by_desc(event::Column::EventDate)
            .order_by_desc(event::Column::Id)
            .limit(limit)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self, new), fields(phone_number_id = new.phone_number_id, event_type = ?new.event_type))]
    pub async fn create_event(&self, new: NewEvent) -> Result<Option<event::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let now = OffsetDateTime::now_utc();
        event::ActiveModel {
            phone_number_id: Set(new.phone_number_id),
            event_type: Set(new.event_type),
            previous_status: Set(new.previous_status),
            new_status: Set(new.new_status),
            message_volume: Set(new.message_volume),
            description: Set(new.description),
            metadata: Set(new.metadata),
            event_date: Set(new.event_date.unwrap_or(now)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_event(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        event::Entity::delete_by_id(id).exec(db).await?;
        Ok(true)
    }
}
