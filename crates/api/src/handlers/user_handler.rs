//! User handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::pagination::UserPage;
use domain::{
    CreateUser, PageRequest, PageResult, UpdateUser, UserResponse, UserRole, UserScope,
    DEFAULT_PAGE_SKIP, DEFAULT_PAGE_TAKE, MAX_PAGE_TAKE,
};

use crate::extractors::{ValidatedJson, ValidatedQuery};
use crate::state::AppState;

fn default_skip() -> i64 {
    DEFAULT_PAGE_SKIP
}

fn default_take() -> i64 {
    DEFAULT_PAGE_TAKE
}

/// Query parameters for listing users
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Number of users to skip
    #[serde(default = "default_skip")]
    #[validate(range(min = 0, message = "skip must be non-negative"))]
    #[param(minimum = 0, example = 0)]
    pub skip: i64,
    /// Page size (1-100)
    #[serde(default = "default_take")]
    #[validate(range(min = 1, max = MAX_PAGE_TAKE))]
    #[param(minimum = 1, maximum = 100, example = 10)]
    pub take: i64,
    /// Which users to include with respect to soft deletion
    #[serde(default)]
    pub scope: UserScope,
}

impl ListUsersQuery {
    fn page(&self) -> PageRequest {
        PageRequest::new(self.skip, self.take)
    }
}

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password123")]
    pub password: String,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "John Doe")]
    pub name: String,
}

/// User update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New display name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// New role, `user` or `admin`
    #[schema(example = "admin")]
    pub role: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UpdateUser {
    type Error = domain::DomainError;

    fn try_from(req: UpdateUserRequest) -> Result<Self, Self::Error> {
        let role = req.role.as_deref().map(str::parse::<UserRole>).transpose()?;
        Ok(UpdateUser {
            name: req.name,
            role,
        })
    }
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/permanent", delete(hard_delete_user))
        .route("/:id/restore", post(restore_user))
}

/// List users one page at a time
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = UserPage),
        (status = 400, description = "Invalid skip, take or scope")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> AppResult<Json<PageResult<UserResponse>>> {
    let page = state.user_service.list_users(query.scope, query.page()).await?;
    Ok(Json(page))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(CreateUser {
            email: payload.email,
            password: payload.password,
            name: payload.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get an active user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update name and/or role
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let changes = UpdateUser::try_from(payload)?;
    let user = state.user_service.update_user(id, changes).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Soft delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Permanently delete a user, active or soft-deleted
#[utoipa::path(
    delete,
    path = "/users/{id}/permanent",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User removed"),
        (status = 404, description = "User not found")
    )
)]
pub async fn hard_delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.user_service.hard_delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted user
#[utoipa::path(
    post,
    path = "/users/{id}/restore",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID to restore")),
    responses(
        (status = 200, description = "User restored", body = UserResponse),
        (status = 400, description = "User is not deleted or does not exist")
    )
)]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.restore_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}
