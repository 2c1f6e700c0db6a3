//! User repository with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, scope_condition, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{PageWindow, UpdateUser, User, UserScope, ROLE_USER};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User persistence.
///
/// `find_by_id` excludes soft-deleted rows. Email lookups see every row
/// because deleted users keep their address. Listing takes an explicit
/// [`UserScope`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new active user with the default role
    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User>;

    /// Apply a partial update to an active user
    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Soft delete (sets deleted_at)
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Remove the row permanently
    async fn hard_delete(&self, id: Uuid) -> AppResult<()>;

    /// Clear deleted_at on a soft-deleted user
    async fn restore(&self, id: Uuid) -> AppResult<User>;

    /// One window of users in `scope`, oldest first, plus the number of
    /// users in `scope` overall.
    async fn list(&self, scope: UserScope, window: PageWindow) -> AppResult<(Vec<User>, u64)>;
}

/// Users in `scope`. Both the count and the page start from this query.
fn scoped_query(scope: UserScope) -> Select<UserEntity> {
    let query = UserEntity::find();
    match scope_condition(scope) {
        Some(condition) => query.filter(condition),
        None => query,
    }
}

/// One window of [`scoped_query`], ordered so ties on `created_at` break by id.
fn page_query(scope: UserScope, window: PageWindow) -> Select<UserEntity> {
    scoped_query(scope)
        .order_by_asc(user::Column::CreatedAt)
        .order_by_asc(user::Column::Id)
        .offset(window.skip())
        .limit(window.take())
}

/// The email pre-check in the service can race a concurrent insert; the
/// unique index is the final word.
fn insert_error(err: DbErr) -> AppError {
    let kind = err.sql_err();
    classify_insert_error(kind, err)
}

fn classify_insert_error(kind: Option<SqlErr>, err: DbErr) -> AppError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Email"),
        _ => AppError::from(err),
    }
}

/// SeaORM-backed [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_active_model(&self, id: Uuid) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_email_with_deleted(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, email: String, password_hash: String, name: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };

        let model = active_model.insert(&self.db).await.map_err(insert_error)?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut active: ActiveModel = self.find_active_model(id).await?.into();
        let now = chrono::Utc::now();
        active.deleted_at = Set(Some(now));
        active.updated_at = Set(now);

        active.update(&self.db).await?;
        Ok(())
    }

    async fn hard_delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn restore(&self, id: Uuid) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_not_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::validation("User is not deleted or does not exist"))?;

        let mut active: ActiveModel = user.into();
        active.deleted_at = Set(None);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn list(&self, scope: UserScope, window: PageWindow) -> AppResult<(Vec<User>, u64)> {
        let total = scoped_query(scope).count(&self.db).await?;
        let models = page_query(scope, window).all(&self.db).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}
