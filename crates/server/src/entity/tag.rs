use sea_orm::entity::prelude::*;
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, ToSchema)]
#[schema(as = Tag)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Hex colour code, e.g. `#ff8800`.
    pub color: Option<String>,
    pub user_id: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::phone_number_tag::Entity")]
    PhoneNumberTag,
}

impl Related<super::phone_number_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhoneNumberTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
