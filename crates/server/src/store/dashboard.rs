use super::ChipStore;
use crate::entity::phone_number;
use crate::stats::DashboardStats;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

impl ChipStore {
    /// Status breakdown of a user's numbers, optionally narrowed to one operation.
    #[tracing::instrument(skip(self))]
    pub async fn get_dashboard_stats(
        &self,
        user_id: i32,
        operation_id: Option<i32>,
    ) -> Result<DashboardStats, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(DashboardStats::default());
        };
        let mut query =
            phone_number::Entity::find().filter(phone_number::Column::UserId.eq(user_id));
        if let Some(operation_id) = operation_id {
            query = query.filter(phone_number::Column::OperationId.eq(operation_id));
        }
        let numbers = query
            .order_by_desc(phone_number::Column::AddedAt)
            .order_by_desc(phone_number::Column::Id)
            .all(db)
            .await?;
        Ok(DashboardStats::from_numbers(numbers))
    }
}
