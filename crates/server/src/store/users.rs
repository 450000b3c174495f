use super::ChipStore;
use crate::entity::user::{self, Role, Theme};
use crate::utils::double_option;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DbErr, EntityTrait, QueryFilter,
};
use serde::Deserialize;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Identity handed over by the (external) auth layer on sign-in.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct NewUser {
    pub open_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub login_method: Option<String>,
}

/// Profile fields a user may change. `null` clears a nullable field.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserProfilePatch {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_photo: Option<Option<String>>,
    pub theme: Option<Theme>,
}

impl ChipStore {
    #[tracing::instrument(skip(self))]
    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<user::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        user::Entity::find_by_id(id).one(db).await
    }

    /// Create the user on first sign-in, otherwise refresh `last_signed_in`
    /// and whatever identity fields were supplied.
    #[tracing::instrument(skip(self, new), fields(open_id = %new.open_id))]
    pub async fn upsert_user(&self, new: NewUser) -> Result<Option<user::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };
        let now = OffsetDateTime::now_utc();

        if let Some(existing) = user::Entity::find()
            .filter(user::Column::OpenId.eq(&new.open_id))
            .one(db)
            .await?
        {
            let mut active: user::ActiveModel = existing.into();
            active.last_signed_in = Set(now);
            active.updated_at = Set(now);
            if new.name.is_some() {
                active.name = Set(new.name);
            }
            if new.email.is_some() {
                active.email = Set(new.email);
            }
            if new.login_method.is_some() {
                active.login_method = Set(new.login_method);
            }
            return active.update(db).await.map(Some);
        }

        let user = user::ActiveModel {
            open_id: Set(new.open_id),
            name: Set(new.name),
            email: Set(new.email),
            password: Set(None),
            login_method: Set(new.login_method),
            role: Set(Role::User),
            profile_photo: Set(None),
            theme: Set(Theme::Dark),
            created_at: Set(now),
            updated_at: Set(now),
            last_signed_in: Set(now),
            ..Default::default()
        };
        let inserted = user.insert(db).await?;
        tracing::info!(
            name = "store.user.created",
            target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
            message = "Created user on first sign-in",
            user_id = inserted.id
        );
        Ok(Some(inserted))
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn update_user_profile(
        &self,
        id: i32,
        patch: UserProfilePatch,
    ) -> Result<Option<user::Model>, DbErr> {
        let Some(db) = self.conn() else {
            return Ok(None);
        };

        let mut active = user::ActiveModel {
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        };
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(photo) = patch.profile_photo {
            active.profile_photo = Set(photo);
        }
        if let Some(theme) = patch.theme {
            active.theme = Set(theme);
        }

        user::Entity::update_many()
            .set(active)
            .filter(user::Column::Id.eq(id))
            .exec(db)
            .await?;
        user::Entity::find_by_id(id).one(db).await
    }
}
