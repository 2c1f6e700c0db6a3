//! `users` table entity.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::SimpleExpr;

use domain::{User, UserRole, UserScope};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// NULL = active, set = soft-deleted
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Row filter for a soft-delete scope. `None` means no filter.
pub fn scope_condition(scope: UserScope) -> Option<SimpleExpr> {
    match scope {
        UserScope::Active => Some(Column::DeletedAt.is_null()),
        UserScope::Deleted => Some(Column::DeletedAt.is_not_null()),
        UserScope::All => None,
    }
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            name: model.name,
            role: UserRole::from(model.role.as_str()),
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
