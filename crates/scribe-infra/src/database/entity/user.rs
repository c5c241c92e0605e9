//! User entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use scribe_core::domain::Role;

/// Stored form of [`Role`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RoleColumn {
    #[sea_orm(string_value = "READ")]
    Read,
    #[sea_orm(string_value = "WRITE")]
    Write,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl From<RoleColumn> for Role {
    fn from(role: RoleColumn) -> Self {
        match role {
            RoleColumn::Read => Role::Read,
            RoleColumn::Write => Role::Write,
            RoleColumn::Admin => Role::Admin,
        }
    }
}

impl From<Role> for RoleColumn {
    fn from(role: Role) -> Self {
        match role {
            Role::Read => RoleColumn::Read,
            Role::Write => RoleColumn::Write,
            Role::Admin => RoleColumn::Admin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub mobile_number: String,
    pub role: RoleColumn,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for scribe_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            password_hash: model.password_hash,
            mobile_number: model.mobile_number,
            role: model.role.into(),
            bio: model.bio,
            avatar: model.avatar,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel. An unsaved user leaves
/// the id to the database sequence.
impl From<scribe_core::domain::User> for ActiveModel {
    fn from(user: scribe_core::domain::User) -> Self {
        Self {
            id: if user.id == 0 { NotSet } else { Set(user.id) },
            full_name: Set(user.full_name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            mobile_number: Set(user.mobile_number),
            role: Set(user.role.into()),
            bio: Set(user.bio),
            avatar: Set(user.avatar),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
