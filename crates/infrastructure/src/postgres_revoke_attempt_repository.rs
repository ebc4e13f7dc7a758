use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};

use sharescope_application::{
    NewRevokeAttempt, RevokeAttemptEntry, RevokeAttemptQuery, RevokeAttemptRepository,
};
use sharescope_core::{ActorIdentity, AppError, AppResult};
use sharescope_domain::RevokeOutcome;

#[cfg(test)]
mod tests;

/// PostgreSQL-backed forensic log of permission revoke attempts.
#[derive(Clone)]
pub struct PostgresRevokeAttemptRepository {
    pool: PgPool,
}

impl PostgresRevokeAttemptRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RevokeAttemptRow {
    id: i64,
    occurred_at: DateTime<Utc>,
    actor_oid: Option<String>,
    actor_upn: Option<String>,
    actor_name: Option<String>,
    drive_id: Option<String>,
    item_id: Option<String>,
    permission_id: Option<String>,
    outcome: String,
    failure_reason: Option<String>,
    warning: Option<String>,
    source: String,
    details: Value,
}

impl TryFrom<RevokeAttemptRow> for RevokeAttemptEntry {
    type Error = AppError;

    fn try_from(row: RevokeAttemptRow) -> Result<Self, Self::Error> {
        let outcome = RevokeOutcome::parse(row.outcome.as_str()).ok_or_else(|| {
            AppError::Internal(format!(
                "revoke log {} has unknown outcome '{}'",
                row.id, row.outcome
            ))
        })?;
        let actor = ActorIdentity::new(row.actor_oid, row.actor_upn, row.actor_name);

        Ok(Self {
            log_id: row.id,
            occurred_at: row.occurred_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            actor: (!actor.is_empty()).then_some(actor),
            drive_id: row.drive_id,
            item_id: row.item_id,
            permission_id: row.permission_id,
            outcome,
            failure_reason: row.failure_reason,
            warning: row.warning,
            source: row.source,
            details: row.details,
        })
    }
}

#[async_trait]
impl RevokeAttemptRepository for PostgresRevokeAttemptRepository {
    async fn append_attempt(&self, attempt: NewRevokeAttempt) -> AppResult<()> {
        let actor = attempt.actor.as_ref();

        sqlx::query(
            r#"
            INSERT INTO revoke_permission_logs (
                actor_oid,
                actor_upn,
                actor_name,
                drive_id,
                item_id,
                permission_id,
                outcome,
                failure_reason,
                warning,
                source,
                details
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(actor.and_then(ActorIdentity::oid))
        .bind(actor.and_then(ActorIdentity::upn))
        .bind(actor.and_then(ActorIdentity::name))
        .bind(attempt.drive_id)
        .bind(attempt.item_id)
        .bind(attempt.permission_id)
        .bind(attempt.outcome.as_str())
        .bind(attempt.failure_reason)
        .bind(attempt.warning)
        .bind(attempt.source)
        .bind(attempt.details)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to append revoke attempt log: {error}"))
        })?;

        Ok(())
    }

    async fn list_recent_attempts(
        &self,
        query: RevokeAttemptQuery,
    ) -> AppResult<Vec<RevokeAttemptEntry>> {
        let capped_limit = query.limit.clamp(1, 500) as i64;
        let capped_offset = query.offset.min(10_000) as i64;
        let rows = sqlx::query_as::<_, RevokeAttemptRow>(
            r#"
            SELECT
                id,
                occurred_at,
                actor_oid,
                actor_upn,
                actor_name,
                drive_id,
                item_id,
                permission_id,
                outcome,
                failure_reason,
                warning,
                source,
                details
            FROM revoke_permission_logs
            WHERE ($1::TEXT IS NULL OR drive_id = $1)
                AND ($2::TEXT IS NULL OR item_id = $2)
                AND ($3::TEXT IS NULL OR outcome = $3)
            ORDER BY occurred_at DESC, id DESC
            LIMIT $4
            OFFSET $5
            "#,
        )
        .bind(query.drive_id)
        .bind(query.item_id)
        .bind(query.outcome.map(|outcome| outcome.as_str()))
        .bind(capped_limit)
        .bind(capped_offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list revoke attempt logs: {error}"))
        })?;

        rows.into_iter().map(RevokeAttemptEntry::try_from).collect()
    }
}
