//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Pagination
// =============================================================================

/// Default offset when a list request omits `skip`
pub const DEFAULT_PAGE_SKIP: i64 = 0;

/// Default page size when a list request omits `take`
pub const DEFAULT_PAGE_TAKE: i64 = 100;

/// Largest page size accepted at the HTTP boundary
pub const MAX_PAGE_TAKE: i64 = 100;

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_take_within_bounds() {
        assert!(DEFAULT_PAGE_TAKE > 0);
        assert!(DEFAULT_PAGE_TAKE <= MAX_PAGE_TAKE);
    }
}
