use async_trait::async_trait;
use sqlx::PgPool;

use sharescope_application::{AuditEvent, AuditRepository};
use sharescope_core::{ActorIdentity, AppError, AppResult};

/// PostgreSQL-backed append-only audit repository.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let actor = event.actor.as_ref();

        sqlx::query(
            r#"
            INSERT INTO audit_log_entries (
                actor_oid,
                actor_upn,
                actor_name,
                action,
                entity_type,
                entity_id,
                details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(actor.and_then(ActorIdentity::oid))
        .bind(actor.and_then(ActorIdentity::upn))
        .bind(actor.and_then(ActorIdentity::name))
        .bind(event.action.as_str())
        .bind(event.entity_type)
        .bind(event.entity_id)
        .bind(event.details)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
