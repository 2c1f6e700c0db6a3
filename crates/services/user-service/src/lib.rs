//! User service library.
//!
//! Persistence, migrations and use cases for users. The HTTP layer embeds
//! it in-process through [`build`].

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::DatabaseConfig;
use sea_orm::DbErr;
use tracing::info;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Connect, migrate and wire the repository into a service.
pub async fn build(config: &DatabaseConfig) -> Result<(Database, Arc<dyn UserService>), DbErr> {
    let db = Database::connect(config).await?;
    let repo = Arc::new(UserStore::new(db.get_connection()));
    let service: Arc<dyn UserService> = Arc::new(UserManager::new(repo));

    Ok((db, service))
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run a migration command against the configured database.
pub async fn run_migrations(config: &DatabaseConfig, action: MigrateAction) -> Result<(), DbErr> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await? {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}
