use async_trait::async_trait;
use serde_json::Value;

use sharescope_core::{ActorIdentity, AppResult};
use sharescope_domain::AuditAction;

/// Immutable audit event payload emitted by application services.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEvent {
    /// Operator that performed the action, when known.
    pub actor: Option<ActorIdentity>,
    /// Stable audit action identifier.
    pub action: AuditAction,
    /// Entity type label.
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: String,
    /// Structured audit detail payload.
    pub details: Value,
}

/// Port for persisting append-only audit events.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: AuditEvent) -> AppResult<()>;
}
