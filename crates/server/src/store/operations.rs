use super::ChipStore;
use crate::entity::operation;
use crate::utils::double_option;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NewOperation {
    pub name: String,
    pub description: Option<String>,
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct OperationPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl ChipStore {
    /// Newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_operations_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<operation::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        operation::Entity::find()
            .filter(operation::Column::UserId.eq(user_id))
            .order_by_desc(operation::Column::CreatedAt)
            .order_by_desc(operation::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_operation_by_id(&self, id: i32) -> Result<Option<operation::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        operation::Entity::find_by_id(id).one(db).await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id))]
    pub async fn create_operation(
        &self,
        new: NewOperation,
    ) -> Result<Option<operation::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let now = OffsetDateTime::now_utc();
        operation::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            user_id: Set(new.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_operation(
        &self,
        id: i32,
        patch: OperationPatch,
    ) -> Result<Option<operation::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };

        let mut active = operation::ActiveModel {
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }

        operation::Entity::update_many()
            .set(active)
            .filter(operation::Column::Id.eq(id))
            .exec(db)
            .await?;
        operation::Entity::find_by_id(id).one(db).await
    }

    /// Removes only the operation row; its phone numbers are left in place.
    #[tracing::instrument(skip(self))]
    pub async fn delete_operation(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        operation::Entity::delete_by_id(id).exec(db).await?;
        Ok(true)
    }
}
