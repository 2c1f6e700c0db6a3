//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::handlers::user_handler::{CreateUserRequest, UpdateUserRequest};
use domain::pagination::UserPage;
use domain::{UserResponse, UserRole, UserScope};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::user_handler::hard_delete_user,
        crate::handlers::user_handler::restore_user,
    ),
    components(
        schemas(
            UserPage,
            UserResponse,
            UserRole,
            UserScope,
            CreateUserRequest,
            UpdateUserRequest,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Liveness and dependency checks"),
    )
)]
pub struct ApiDoc;
