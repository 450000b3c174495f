use super::ChipStore;
use crate::entity::{phone_number_tag, tag};
use sea_orm::sea_query::JoinType;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NewTag {
    pub name: String,
    pub color: Option<String>,
    /// Filled from the request path by the API.
    #[serde(default)]
    pub user_id: i32,
}

impl ChipStore {
    /// Alphabetical by name.
    #[tracing::instrument(skip(self))]
    pub async fn get_tags_by_user_id(&self, user_id: i32) -> Result<Vec<tag::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        tag::Entity::find()
            .filter(tag::Column::UserId.eq(user_id))
            .order_by_asc(tag::Column::Name)
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await
    }

    #[tracing::instrument(skip(self, new), fields(user_id = new.user_id))]
    pub async fn create_tag(&self, new: NewTag) -> Result<Option<tag::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        tag::ActiveModel {
            name: Set(new.name),
            color: Set(new.color),
            user_id: Set(new.user_id),
            created_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map(Some)
    }

    /// Removes the tag and every link to it in one transaction.
    #[tracing::instrument(skip(self))]
    pub async fn delete_tag(&self, id: i32) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        let txn = db.begin().await?;
        let links = phone_number_tag::Entity::delete_many()
            .filter(phone_number_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        tag::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            name = "store.tag.deleted",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Deleted tag and its links",
            tag_id = id,
            tag_links = links.rows_affected
        );
        Ok(true)
    }

    /// Links a tag to a number. Linking twice leaves a single link.
    #[tracing::instrument(skip(self))]
    pub async fn add_tag_to_phone_number(
        &self,
        phone_number_id: i32,
        tag_id: i32,
    ) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        let existing = phone_number_tag::Entity::find()
            .filter(phone_number_tag::Column::PhoneNumberId.eq(phone_number_id))
            .filter(phone_number_tag::Column::TagId.eq(tag_id))
            .count(db)
            .await?;
        if existing == 0 {
            phone_number_tag::ActiveModel {
                phone_number_id: Set(phone_number_id),
                tag_id: Set(tag_id),
                created_at: Set(OffsetDateTime::now_utc()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_tag_from_phone_number(
        &self,
        phone_number_id: i32,
        tag_id: i32,
    ) -> Result<bool, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(false);
        };
        phone_number_tag::Entity::delete_many()
            .filter(phone_number_tag::Column::PhoneNumberId.eq(phone_number_id))
            .filter(phone_number_tag::Column::TagId.eq(tag_id))
            .exec(db)
            .await?;
        Ok(true)
    }

    /// Tags linked to a number, alphabetical by name.
    #[tracing::instrument(skip(self))]
    pub async fn get_tags_for_phone_number(
        &self,
        phone_number_id: i32,
    ) -> Result<Vec<tag::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(Vec::new());
        };
        tag::Entity::find()
            .join(JoinType::InnerJoin, tag::Relation::PhoneNumberTag.def())
            .filter(phone_number_tag::Column::PhoneNumberId.eq(phone_number_id))
            .order_by_asc(tag::Column::Name)
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await
    }
}
