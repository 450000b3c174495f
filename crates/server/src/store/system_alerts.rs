use super::ChipStore;
use crate::entity::system_alert::{self, AlertType, Severity};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewSystemAlert {
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
    pub phone_number_id: Option<i32>,
    pub alert_type: AlertType,
    /// Defaults to `medium`.
    pub severity: Option<Severity>,
    pub title: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ChipStore {
    #[tracing::instrument(skip(self))]
    pub async fn get_system_alerts_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<system_alert::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        system_alert::Entity::find()
            .filter(system_alert::Column::UserId.eq(user_id))
            .order_by_desc(system_alert::Column::CreatedAt)
            .order_by_desc(system_alert::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_unresolved_system_alerts(
        &self,
        user_id: i32,
    ) -> Result<Vec<system_alert::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        system_alert::Entity::find()
            .filter(system_alert::Column::UserId.eq(user_id))
            .filter(system_alert::Column::IsResolved.eq(false))
            .order_by_desc(system_alert::Column::CreatedAt)
            .order_by_desc(system_alert::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id, alert_type = ?new.alert_type))]
    pub async fn create_system_alert(
        &self,
        new: NewSystemAlert,
    ) -> Result<Option<system_alert::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        system_alert::ActiveModel {
            user_id: Set(new.user_id),
            phone_number_id: Set(new.phone_number_id),
            alert_type: Set(new.alert_type),
            severity: Set(new.severity.unwrap_or_default()),
            title: Set(new.title),
            message: Set(new.message),
            suggestion: Set(new.suggestion),
            is_resolved: Set(false),
            resolved_at: Set(None),
            created_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    /// Resolving an already resolved alert keeps its first `resolved_at`.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_system_alert(
        &self,
        id: i32,
    ) -> Result<Option<system_alert::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        system_alert::Entity::update_many()
            .col_expr(system_alert::Column::IsResolved, Expr::value(true))
            .col_expr(
                system_alert::Column::ResolvedAt,
                Expr::value(OffsetDateTime::now_utc()),
            )
            .filter(system_alert::Column::Id.eq(id))
            .filter(system_alert::Column::IsResolved.eq(false))
            .exec(db)
            .await?;
        system_alert::Entity::find_by_id(id).one(db).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_system_alert(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        system_alert::Entity::delete_by_id(id).exec(db).await?;
        Ok(true)
    }
}
