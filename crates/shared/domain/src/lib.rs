//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity and its response projection, the password value object,
//! and the list-response paginator shared by every list endpoint.

pub mod constants;
pub mod error;
pub mod pagination;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use pagination::{
    paginate, paginate_with_mapper, paginate_with_projection, PageMeta, PageRequest, PageResult,
    PageWindow, PaginationError,
};
pub use password::Password;
pub use user::{CreateUser, UpdateUser, User, UserResponse, UserRole, UserScope};
