//! User service tests against a mocked repository.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use common::AppError;
use domain::{CreateUser, PageRequest, UpdateUser, User, UserRole, UserScope};
use user_service_lib::repository::MockUserRepository;
use user_service_lib::service::{UserManager, UserService};

fn create_test_user(id: Uuid) -> User {
    User {
        id,
        email: format!("{id}@example.com"),
        password_hash: "hashed".to_string(),
        name: "Test User".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

fn users(count: usize) -> Vec<User> {
    (0..count).map(|_| create_test_user(Uuid::new_v4())).collect()
}

fn service(repo: MockUserRepository) -> UserManager {
    UserManager::new(Arc::new(repo))
}

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(user_id))
        .returning(|id| Ok(Some(create_test_user(id))));

    let user = service(repo).get_user(user_id).await.unwrap();
    assert_eq!(user.id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let result = service(repo).get_user(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_list_users_builds_page_from_window_and_count() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .withf(|scope, window| {
            *scope == UserScope::Active && window.skip() == 20 && window.take() == 10
        })
        .times(1)
        .returning(|_, _| Ok((users(10), 45)));

    let page = service(repo)
        .list_users(UserScope::Active, PageRequest::new(20, 10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 10);
    assert_eq!(page.total_items, 45);
    assert_eq!(page.total_pages, 5);
    assert_eq!(page.current_page, 3);
    assert_eq!(page.items_per_page, 10);
    assert!(page.has_next_page);
    assert!(page.has_previous_page);
}

#[tokio::test]
async fn test_list_users_projection_hides_password_hash() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|_, _| Ok((users(2), 2)));

    let page = service(repo)
        .list_users(UserScope::All, PageRequest::default())
        .await
        .unwrap();
    let json = serde_json::to_string(&page).unwrap();

    assert!(!json.contains("password"));
    assert!(!json.contains("hashed"));
    assert!(json.contains("\"totalItems\":2"));
}

#[tokio::test]
async fn test_list_users_empty_result_has_one_page() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|_, _| Ok((Vec::new(), 0)));

    let page = service(repo)
        .list_users(UserScope::Deleted, PageRequest::new(0, 10))
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.current_page, 1);
    assert!(!page.has_next_page);
    assert!(!page.has_previous_page);
}

#[tokio::test]
async fn test_list_users_past_the_end_is_not_clamped() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().returning(|_, _| Ok((Vec::new(), 5)));

    let page = service(repo)
        .list_users(UserScope::Active, PageRequest::new(100, 10))
        .await
        .unwrap();

    assert_eq!(page.current_page, 11);
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next_page);
    assert!(page.is_past_end());
}

#[tokio::test]
async fn test_list_users_invalid_window_never_hits_repository() {
    let mut repo = MockUserRepository::new();
    repo.expect_list().never();
    let service = service(repo);

    let zero_take = service
        .list_users(UserScope::Active, PageRequest::new(0, 0))
        .await;
    assert!(matches!(
        zero_take,
        Err(AppError::Validation(msg)) if msg == "take must be greater than 0"
    ));

    let negative_skip = service
        .list_users(UserScope::Active, PageRequest::new(-1, 10))
        .await;
    assert!(matches!(
        negative_skip,
        Err(AppError::Validation(msg)) if msg == "skip must be non-negative"
    ));
}

#[tokio::test]
async fn test_list_users_propagates_repository_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_list()
        .returning(|_, _| Err(AppError::internal("connection reset")));

    let result = service(repo)
        .list_users(UserScope::Active, PageRequest::default())
        .await;
    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn test_create_user_hashes_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_with_deleted()
        .withf(|email| email == "new@example.com")
        .returning(|_| Ok(None));
    repo.expect_create()
        .withf(|email, hash, name| {
            email == "new@example.com" && hash.starts_with("$argon2") && name == "New User"
        })
        .returning(|email, hash, name| Ok(User::new(Uuid::new_v4(), email, hash, name)));

    let user = service(repo)
        .create_user(CreateUser {
            email: "new@example.com".to_string(),
            password: "correct horse".to_string(),
            name: "New User".to_string(),
        })
        .await
        .unwrap();

    assert_ne!(user.password_hash, "correct horse");
    assert_eq!(user.role, UserRole::User);
}

#[tokio::test]
async fn test_create_user_duplicate_email_conflicts() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_with_deleted()
        .returning(|_| Ok(Some(create_test_user(Uuid::new_v4()))));
    repo.expect_create().never();

    let result = service(repo)
        .create_user(CreateUser {
            email: "taken@example.com".to_string(),
            password: "password123".to_string(),
            name: "Dup".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_create_user_short_password_rejected() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_email_with_deleted().returning(|_| Ok(None));
    repo.expect_create().never();

    let result = service(repo)
        .create_user(CreateUser {
            email: "short@example.com".to_string(),
            password: "short".to_string(),
            name: "Short".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_update_user_passes_changes_through() {
    let user_id = Uuid::new_v4();
    let changes = UpdateUser {
        name: Some("Renamed".to_string()),
        role: Some(UserRole::Admin),
    };

    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .with(eq(user_id), eq(changes.clone()))
        .returning(|id, changes| {
            let mut user = create_test_user(id);
            user.name = changes.name.unwrap_or(user.name);
            user.role = changes.role.unwrap_or(user.role);
            Ok(user)
        });

    let user = service(repo).update_user(user_id, changes).await.unwrap();
    assert_eq!(user.name, "Renamed");
    assert_eq!(user.role, UserRole::Admin);
}

#[tokio::test]
async fn test_empty_update_reads_current_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().never();
    repo.expect_find_by_id()
        .returning(|id| Ok(Some(create_test_user(id))));

    let result = service(repo)
        .update_user(Uuid::new_v4(), UpdateUser::default())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_delete_and_hard_delete() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_delete().with(eq(user_id)).returning(|_| Ok(()));
    repo.expect_hard_delete()
        .with(eq(user_id))
        .returning(|_| Err(AppError::NotFound));
    let service = service(repo);

    assert!(service.delete_user(user_id).await.is_ok());
    assert!(matches!(
        service.hard_delete_user(user_id).await,
        Err(AppError::NotFound)
    ));
}

#[tokio::test]
async fn test_restore_user_success() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepository::new();
    repo.expect_restore()
        .with(eq(user_id))
        .returning(|id| Ok(create_test_user(id)));

    let user = service(repo).restore_user(user_id).await.unwrap();
    assert!(!user.is_deleted());
}
