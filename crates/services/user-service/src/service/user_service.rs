//! User use cases on top of [`UserRepository`].

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    paginate_with_projection, CreateUser, PageRequest, PageResult, Password, UpdateUser, User,
    UserResponse, UserScope,
};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
///
/// Single-user lookups exclude soft-deleted users.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// One page of users in `scope`, projected for clients
    async fn list_users(
        &self,
        scope: UserScope,
        page: PageRequest,
    ) -> AppResult<PageResult<UserResponse>>;

    /// Hash the password and insert; emails of soft-deleted users stay taken
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User>;

    /// Soft delete (sets deleted_at)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Remove the user permanently
    async fn hard_delete_user(&self, id: Uuid) -> AppResult<()>;

    async fn restore_user(&self, id: Uuid) -> AppResult<User>;
}

/// [`UserService`] backed by a repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(
        &self,
        scope: UserScope,
        page: PageRequest,
    ) -> AppResult<PageResult<UserResponse>> {
        // Reject a bad window before it reaches the database.
        let window = page.window()?;
        let (users, total) = self.repo.list(scope, window).await?;

        let total = i64::try_from(total)
            .map_err(|_| AppError::internal(format!("user count {total} out of range")))?;
        let result = paginate_with_projection::<UserResponse, _>(users, total, page.skip, page.take)?;

        tracing::debug!(
            ?scope,
            skip = page.skip,
            take = page.take,
            total_items = result.total_items,
            returned = result.data.len(),
            past_end = result.is_past_end(),
            "Listed users"
        );

        Ok(result)
    }

    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        if self
            .repo
            .find_by_email_with_deleted(&input.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }

        // Argon2 hashing blocks the thread.
        let plain_text = input.password;
        let password = tokio::task::spawn_blocking(move || Password::new(&plain_text))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))??;

        let user = self
            .repo
            .create(input.email, password.into_string(), input.name)
            .await?;
        tracing::info!(user_id = %user.id, "User created");

        Ok(user)
    }

    async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        if changes.is_empty() {
            return self.get_user(id).await;
        }
        self.repo.update(id, changes).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await
    }

    async fn hard_delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.hard_delete(id).await?;
        tracing::warn!(user_id = %id, "User permanently deleted");
        Ok(())
    }

    async fn restore_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.restore(id).await
    }
}
