use async_trait::async_trait;
use sqlx::PgPool;

use sharescope_application::PermissionCacheRepository;
use sharescope_core::{AppError, AppResult};
use sharescope_domain::GrantKey;


/// PostgreSQL-backed projection of drive item permissions ingested from
/// the directory service.
#[derive(Clone)]
pub struct PostgresPermissionCacheRepository {
    pool: PgPool,
}

impl PostgresPermissionCacheRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionCacheRepository for PostgresPermissionCacheRepository {
    async fn remove_permission(&self, key: &GrantKey) -> AppResult<()> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        sqlx::query(
            r#"
            DELETE FROM msgraph_drive_item_permission_grants
            WHERE drive_id = $1 AND item_id = $2 AND permission_id = $3
            "#,
        )
        .bind(key.drive_id())
        .bind(key.item_id())
        .bind(key.permission_id())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete cached permission grants: {error}"))
        })?;

        sqlx::query(
            r#"
            DELETE FROM msgraph_drive_item_permissions
            WHERE drive_id = $1 AND item_id = $2 AND permission_id = $3
            "#,
        )
        .bind(key.drive_id())
        .bind(key.item_id())
        .bind(key.permission_id())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to delete cached permission: {error}"))
        })?;

        sqlx::query(
            r#"
            UPDATE msgraph_drive_items
            SET permissions_last_synced_at = now(),
                permissions_last_error_at = NULL,
                permissions_last_error = NULL
            WHERE drive_id = $1 AND id = $2
            "#,
        )
        .bind(key.drive_id())
        .bind(key.item_id())
        .execute(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update item permission sync state: {error}"))
        })?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(())
    }
}
