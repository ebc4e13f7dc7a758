use std::sync::Arc;

use serde_json::{Map, Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use sharescope_core::{ActorIdentity, AppError, AppResult};
use sharescope_domain::{
    AUDIT_WRITE_FAILED_WARNING_PREFIX, AuditAction, GrantKey, LOCAL_SYNC_FAILED_WARNING_PREFIX,
    MISSING_GRANT_IDENTIFIERS, PermissionGrant, PolicyDecision, RevokeOutcome, RevokeStage,
    WARNING_SEPARATOR, bound_warning, evaluate_revocation,
};

use crate::{
    AuditEvent, AuditRepository, DirectoryService, ForensicLogger, PermissionCacheRepository,
    RevokeAttemptInput,
};


/// Raw identifiers received from the invocation surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevokePermissionInput {
    /// Drive identifier.
    pub drive_id: Option<String>,
    /// Drive item identifier.
    pub item_id: Option<String>,
    /// Permission identifier.
    pub permission_id: Option<String>,
    /// Calling surface tag recorded in the forensic log. Blank falls back
    /// to the logger default.
    pub source: Option<String>,
}

/// Result of a revocation whose directory deletion succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevokeSuccess {
    /// Non-fatal follow-up failures, if any.
    pub warning: Option<String>,
}

/// Orchestrates permission revocation against the directory service.
///
/// Steps run strictly in order: fetch, policy, delete, cache sync, audit,
/// forensic log. Once the directory deletion succeeds the operation is
/// successful; later failures only add warnings. Every invocation leaves
/// exactly one forensic record unless the log store itself is failing.
#[derive(Clone)]
pub struct RevocationService {
    directory: Arc<dyn DirectoryService>,
    cache_repository: Arc<dyn PermissionCacheRepository>,
    audit_repository: Arc<dyn AuditRepository>,
    forensic_logger: ForensicLogger,
}

struct AttemptContext<'a> {
    correlation_id: Uuid,
    actor: Option<&'a ActorIdentity>,
    drive_id: Option<String>,
    item_id: Option<String>,
    permission_id: Option<String>,
    source: Option<String>,
}

impl RevocationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        directory: Arc<dyn DirectoryService>,
        cache_repository: Arc<dyn PermissionCacheRepository>,
        audit_repository: Arc<dyn AuditRepository>,
        forensic_logger: ForensicLogger,
    ) -> Self {
        Self {
            directory,
            cache_repository,
            audit_repository,
            forensic_logger,
        }
    }

    /// Revokes one drive item permission on behalf of an already authorized
    /// caller.
    pub async fn revoke(
        &self,
        input: RevokePermissionInput,
        actor: Option<&ActorIdentity>,
    ) -> AppResult<RevokeSuccess> {
        let context = AttemptContext {
            correlation_id: Uuid::new_v4(),
            actor,
            drive_id: normalize(input.drive_id),
            item_id: normalize(input.item_id),
            permission_id: normalize(input.permission_id),
            source: normalize(input.source),
        };

        if actor.is_none_or(ActorIdentity::is_empty) {
            info!(
                correlation_id = %context.correlation_id,
                "revoke requested without actor identity"
            );
        }

        let Some(key) = grant_key(&context) else {
            let mut details = Map::new();
            details.insert("missing".to_owned(), json!(missing_fields(&context)));
            self.record_failure(
                &context,
                RevokeStage::Validation,
                MISSING_GRANT_IDENTIFIERS,
                details,
            )
            .await;
            return Err(AppError::Validation(MISSING_GRANT_IDENTIFIERS.to_owned()));
        };

        let grant = match self.directory.get_permission(&key).await {
            Ok(grant) => grant,
            Err(error) => {
                warn!(
                    correlation_id = %context.correlation_id,
                    grant = %key,
                    error = %error,
                    "failed to fetch permission before revoke"
                );
                self.record_failure(
                    &context,
                    RevokeStage::GraphGetPermission,
                    error.detail(),
                    Map::new(),
                )
                .await;
                return Err(AppError::Upstream(error.detail().to_owned()));
            }
        };

        if let PolicyDecision::Deny(reason) = evaluate_revocation(&grant) {
            info!(
                correlation_id = %context.correlation_id,
                grant = %key,
                reason = reason.as_str(),
                "permission revoke blocked by policy"
            );
            let details = match reason.offending_details(&grant) {
                Value::Object(details) => details,
                _ => Map::new(),
            };
            self.record_failure(&context, RevokeStage::Validation, reason.as_str(), details)
                .await;
            return Err(AppError::Forbidden(reason.as_str().to_owned()));
        }

        if let Err(error) = self.directory.delete_permission(&key).await {
            warn!(
                correlation_id = %context.correlation_id,
                grant = %key,
                error = %error,
                "directory permission delete failed"
            );
            self.record_failure(
                &context,
                RevokeStage::GraphDeletePermission,
                error.detail(),
                grant_details(&grant),
            )
            .await;
            return Err(AppError::Upstream(error.detail().to_owned()));
        }

        info!(
            correlation_id = %context.correlation_id,
            grant = %key,
            "directory permission deleted"
        );

        let mut warnings = Vec::new();

        if let Err(error) = self.cache_repository.remove_permission(&key).await {
            warn!(
                correlation_id = %context.correlation_id,
                grant = %key,
                error = %error,
                "local permission cache sync failed after directory delete"
            );
            warnings.push(format!("{LOCAL_SYNC_FAILED_WARNING_PREFIX}{}", error.detail()));
        }

        let audit_event = AuditEvent {
            actor: actor.filter(|actor| !actor.is_empty()).cloned(),
            action: AuditAction::PermissionDeleted,
            entity_type: "drive_item_permission".to_owned(),
            entity_id: key.composite_id(),
            details: json!({ "roles": grant.roles, "link": grant.link }),
        };
        if let Err(error) = self.audit_repository.append_event(audit_event).await {
            warn!(
                correlation_id = %context.correlation_id,
                grant = %key,
                error = %error,
                "audit write failed after directory delete"
            );
            warnings.push(format!("{AUDIT_WRITE_FAILED_WARNING_PREFIX}{}", error.detail()));
        }

        let warning =
            (!warnings.is_empty()).then(|| bound_warning(&warnings.join(WARNING_SEPARATOR)));

        self.forensic_logger
            .record(RevokeAttemptInput {
                actor: context.actor.cloned(),
                drive_id: context.drive_id.clone(),
                item_id: context.item_id.clone(),
                permission_id: context.permission_id.clone(),
                outcome: RevokeOutcome::Success,
                stage: RevokeStage::Completed,
                failure_reason: None,
                warning: warning.clone(),
                source: context.source.clone(),
                details: with_correlation(&context, grant_details(&grant)),
            })
            .await;

        Ok(RevokeSuccess { warning })
    }

    async fn record_failure(
        &self,
        context: &AttemptContext<'_>,
        stage: RevokeStage,
        reason: &str,
        details: Map<String, Value>,
    ) {
        self.forensic_logger
            .record(RevokeAttemptInput {
                actor: context.actor.cloned(),
                drive_id: context.drive_id.clone(),
                item_id: context.item_id.clone(),
                permission_id: context.permission_id.clone(),
                outcome: RevokeOutcome::Failed,
                stage,
                failure_reason: Some(reason.to_owned()),
                warning: None,
                source: context.source.clone(),
                details: with_correlation(context, details),
            })
            .await;
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn grant_key(context: &AttemptContext<'_>) -> Option<GrantKey> {
    match (
        context.drive_id.as_deref(),
        context.item_id.as_deref(),
        context.permission_id.as_deref(),
    ) {
        (Some(drive_id), Some(item_id), Some(permission_id)) => {
            GrantKey::new(drive_id, item_id, permission_id).ok()
        }
        _ => None,
    }
}

fn missing_fields(context: &AttemptContext<'_>) -> Vec<&'static str> {
    [
        ("driveId", context.drive_id.is_none()),
        ("itemId", context.item_id.is_none()),
        ("permissionId", context.permission_id.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect()
}

fn grant_details(grant: &PermissionGrant) -> Map<String, Value> {
    let mut details = Map::new();
    details.insert("roles".to_owned(), json!(grant.roles));
    details.insert("link".to_owned(), json!(grant.link));
    details
}

fn with_correlation(
    context: &AttemptContext<'_>,
    mut details: Map<String, Value>,
) -> Map<String, Value> {
    details.insert(
        "correlationId".to_owned(),
        Value::String(context.correlation_id.to_string()),
    );
    details
}
