use serde::{Deserialize, Serialize};

/// Failure code returned when any grant identifier is missing.
pub const MISSING_GRANT_IDENTIFIERS: &str = "driveId_itemId_permissionId_required";

/// Warning prefix used when the local cache could not be reconciled.
pub const LOCAL_SYNC_FAILED_WARNING_PREFIX: &str = "graph_delete_succeeded_local_sync_failed:";

/// Warning prefix used when the audit trail could not be written.
pub const AUDIT_WRITE_FAILED_WARNING_PREFIX: &str = "audit_write_failed:";

/// Separator placed between accumulated warnings.
pub const WARNING_SEPARATOR: &str = " | ";

/// Maximum stored length of a failure reason, in characters.
pub const FAILURE_REASON_MAX_CHARS: usize = 240;

/// Maximum stored length of a warning, in characters.
pub const WARNING_MAX_CHARS: usize = 500;

/// Pipeline stage recorded on every revoke attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeStage {
    /// Input or policy validation.
    Validation,
    /// Fetching the live permission from the directory service.
    GraphGetPermission,
    /// Deleting the permission in the directory service.
    GraphDeletePermission,
    /// The directory deletion succeeded.
    Completed,
}

impl RevokeStage {
    /// Returns a stable storage value for this stage.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::GraphGetPermission => "graph_get_permission",
            Self::GraphDeletePermission => "graph_delete_permission",
            Self::Completed => "completed",
        }
    }
}

/// Terminal outcome of one revoke attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeOutcome {
    /// The directory deletion happened.
    Success,
    /// The attempt stopped before or at the directory deletion.
    Failed,
}

impl RevokeOutcome {
    /// Returns a stable storage value for this outcome.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
        }
    }

    /// Parses a storage value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Stable audit actions emitted by application use-cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a drive item permission is deleted.
    PermissionDeleted,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionDeleted => "permission_deleted",
        }
    }
}

/// Removes closed `<...>` spans and any stray angle brackets, then
/// truncates to [`FAILURE_REASON_MAX_CHARS`].
#[must_use]
pub fn sanitize_failure_reason(value: &str) -> String {
    let mut stripped = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(open) = rest.find(['<', '>']) {
        stripped.push_str(&rest[..open]);
        let tail = &rest[open..];
        rest = match (tail.starts_with('<'), tail.find('>')) {
            (true, Some(close)) => &tail[close + 1..],
            _ => &tail[1..],
        };
    }
    stripped.push_str(rest);

    truncate_chars(stripped.trim(), FAILURE_REASON_MAX_CHARS)
}

/// Truncates a warning to [`WARNING_MAX_CHARS`].
#[must_use]
pub fn bound_warning(value: &str) -> String {
    truncate_chars(value.trim(), WARNING_MAX_CHARS)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
