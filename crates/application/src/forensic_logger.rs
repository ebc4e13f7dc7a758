use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::warn;

use sharescope_core::ActorIdentity;
use sharescope_domain::{RevokeOutcome, RevokeStage, bound_warning, sanitize_failure_reason};

use crate::{NewRevokeAttempt, RevokeAttemptRepository};

/// Source tag recorded when the caller does not provide one.
pub const DEFAULT_REVOKE_SOURCE: &str = "item_permissions_revoke";

/// Fields assembled by the revocation pipeline for one forensic record.
#[derive(Debug, Clone, PartialEq)]
pub struct RevokeAttemptInput {
    /// Operator identity, if any.
    pub actor: Option<ActorIdentity>,
    /// Drive identifier, when known.
    pub drive_id: Option<String>,
    /// Drive item identifier, when known.
    pub item_id: Option<String>,
    /// Permission identifier, when known.
    pub permission_id: Option<String>,
    /// Terminal outcome.
    pub outcome: RevokeOutcome,
    /// Stage the outcome was decided at.
    pub stage: RevokeStage,
    /// Raw failure reason.
    pub failure_reason: Option<String>,
    /// Raw accumulated warning.
    pub warning: Option<String>,
    /// Source override.
    pub source: Option<String>,
    /// Stage-specific context.
    pub details: Map<String, Value>,
}

/// Append-only writer for revoke attempts. Never fails observably.
#[derive(Clone)]
pub struct ForensicLogger {
    repository: Arc<dyn RevokeAttemptRepository>,
    default_source: String,
}

impl ForensicLogger {
    /// Creates a logger writing to the given repository.
    #[must_use]
    pub fn new(repository: Arc<dyn RevokeAttemptRepository>) -> Self {
        Self {
            repository,
            default_source: DEFAULT_REVOKE_SOURCE.to_owned(),
        }
    }

    /// Overrides the default source tag.
    #[must_use]
    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = source.into();
        self
    }

    /// Records one attempt. Store failures are logged and discarded.
    pub async fn record(&self, input: RevokeAttemptInput) {
        let outcome = input.outcome;
        let stage = input.stage;
        let attempt = self.prepare(input);

        if let Err(error) = self.repository.append_attempt(attempt).await {
            warn!(
                error = %error,
                outcome = outcome.as_str(),
                stage = stage.as_str(),
                "failed to write revoke attempt log"
            );
        }
    }

    fn prepare(&self, input: RevokeAttemptInput) -> NewRevokeAttempt {
        let failure_reason = match input.outcome {
            RevokeOutcome::Failed => input
                .failure_reason
                .as_deref()
                .map(sanitize_failure_reason)
                .filter(|reason| !reason.is_empty()),
            RevokeOutcome::Success => None,
        };
        let warning = match input.outcome {
            RevokeOutcome::Success => input
                .warning
                .as_deref()
                .map(bound_warning)
                .filter(|warning| !warning.is_empty()),
            RevokeOutcome::Failed => None,
        };

        let mut details = input.details;
        details.insert(
            "stage".to_owned(),
            Value::String(input.stage.as_str().to_owned()),
        );

        NewRevokeAttempt {
            actor: input.actor.filter(|actor| !actor.is_empty()),
            drive_id: input.drive_id,
            item_id: input.item_id,
            permission_id: input.permission_id,
            outcome: input.outcome,
            failure_reason,
            warning,
            source: input
                .source
                .filter(|source| !source.trim().is_empty())
                .unwrap_or_else(|| self.default_source.clone()),
            details: Value::Object(details),
        }
    }
}
