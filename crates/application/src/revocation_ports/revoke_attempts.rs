use async_trait::async_trait;
use serde_json::Value;

use sharescope_core::{ActorIdentity, AppResult};
use sharescope_domain::RevokeOutcome;

/// Fully prepared forensic record for one revoke invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRevokeAttempt {
    /// Operator identity, omitted when no identity field was available.
    pub actor: Option<ActorIdentity>,
    /// Drive identifier, when known.
    pub drive_id: Option<String>,
    /// Drive item identifier, when known.
    pub item_id: Option<String>,
    /// Permission identifier, when known.
    pub permission_id: Option<String>,
    /// Terminal outcome.
    pub outcome: RevokeOutcome,
    /// Sanitized failure reason, present only for failed attempts.
    pub failure_reason: Option<String>,
    /// Bounded warning, present only for successful attempts.
    pub warning: Option<String>,
    /// Calling surface tag.
    pub source: String,
    /// Stage-tagged structured context.
    pub details: Value,
}

/// Stored forensic record projection.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeAttemptEntry {
    /// Store-assigned sequential identifier.
    pub log_id: i64,
    /// Store-assigned timestamp in RFC3339.
    pub occurred_at: String,
    /// Operator identity.
    pub actor: Option<ActorIdentity>,
    /// Drive identifier.
    pub drive_id: Option<String>,
    /// Drive item identifier.
    pub item_id: Option<String>,
    /// Permission identifier.
    pub permission_id: Option<String>,
    /// Terminal outcome.
    pub outcome: RevokeOutcome,
    /// Failure reason.
    pub failure_reason: Option<String>,
    /// Warning.
    pub warning: Option<String>,
    /// Calling surface tag.
    pub source: String,
    /// Structured context.
    pub details: Value,
}

/// Query parameters for forensic log listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeAttemptQuery {
    /// Maximum rows returned.
    pub limit: usize,
    /// Number of rows skipped for offset pagination.
    pub offset: usize,
    /// Optional drive filter.
    pub drive_id: Option<String>,
    /// Optional item filter.
    pub item_id: Option<String>,
    /// Optional outcome filter.
    pub outcome: Option<RevokeOutcome>,
}

/// Port for the append-only forensic revoke log.
#[async_trait]
pub trait RevokeAttemptRepository: Send + Sync {
    /// Appends one attempt. The store assigns the identifier and timestamp.
    async fn append_attempt(&self, attempt: NewRevokeAttempt) -> AppResult<()>;

    /// Lists the most recent attempts, newest first.
    async fn list_recent_attempts(
        &self,
        query: RevokeAttemptQuery,
    ) -> AppResult<Vec<RevokeAttemptEntry>>;
}
