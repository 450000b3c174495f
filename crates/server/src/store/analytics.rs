use super::ChipStore;
use crate::entity::event::{self, EventType};
use crate::stats::{self, PhoneNumberStats};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use time::{Duration, OffsetDateTime};

pub const DEFAULT_VOLUME_HISTORY_DAYS: u32 = 30;

impl ChipStore {
    #[tracing::instrument(skip(self))]
    pub async fn get_block_count(&self, phone_number_id: i32) -> Result<u64, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(0);
        };
        event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .filter(event::Column::EventType.eq(EventType::Block))
            .count(db)
            .await
    }

    /// See [`stats::average_recovery_hours`].
    #[tracing::instrument(skip(self))]
    pub async fn get_average_recovery_time(
        &self,
        phone_number_id: i32,
    ) -> Result<Option<i64>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let events = event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .filter(event::Column::EventType.is_in([EventType::Block, EventType::Unblock]))
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::Id)
            .all(db)
            .await?;
        Ok(stats::average_recovery_hours(&events))
    }

    /// Highest recorded daily volume, 0 when nothing was recorded.
    #[tracing::instrument(skip(self))]
    pub async fn get_max_daily_volume(&self, phone_number_id: i32) -> Result<i32, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(0);
        };
        let max: Option<Option<i32>> = event::Entity::find()
            .select_only()
            .column_as(
                Expr::col((event::Entity, event::Column::MessageVolume)).max(),
                "max_volume",
            )
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .filter(event::Column::EventType.eq(EventType::VolumeRecord))
            .into_tuple()
            .one(db)
            .await?;
        Ok(max.flatten().unwrap_or(0))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_phone_number_stats(
        &self,
        phone_number_id: i32,
    ) -> Result<PhoneNumberStats, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(PhoneNumberStats::default());
        };
        let events = event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .all(db)
            .await?;
        Ok(PhoneNumberStats::from_events(&events))
    }

    /// Volume records from the last `days` days, oldest first.
    ///
    /// `days` larger than the calendar allows returns the whole history.
    #[tracing::instrument(skip(self))]
    pub async fn get_volume_history(
        &self,
        phone_number_id: i32,
        days: u32,
    ) -> Result<Vec<event::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        let mut query = event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .filter(event::Column::EventType.eq(EventType::VolumeRecord));
        // A window reaching past the representable range has no lower bound.
        if let Some(since) = OffsetDateTime::now_utc().checked_sub(Duration::days(i64::from(days)))
        {
            query = query.filter(event::Column::EventDate.gte(since));
        }
        query
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::Id)
            .all(db)
            .await
    }

    /// Every status change of a number, oldest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_status_history(
        &self,
        phone_number_id: i32,
    ) -> Result<Vec<event::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        event::Entity::find()
            .filter(event::Column::PhoneNumberId.eq(phone_number_id))
            .filter(event::Column::EventType.eq(EventType::StatusChange))
            .order_by_asc(event::Column::EventDate)
            .order_by_asc(event::Column::Id)
            .all(db)
            .await
    }
}
