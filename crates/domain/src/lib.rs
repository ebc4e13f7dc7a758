//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod grant;
mod policy;
mod revocation;

pub use grant::{GrantKey, ItemReference, PermissionGrant, SharingLink};
pub use policy::{DenyReason, PolicyDecision, evaluate_revocation};
pub use revocation::{
    AUDIT_WRITE_FAILED_WARNING_PREFIX, AuditAction, FAILURE_REASON_MAX_CHARS,
    LOCAL_SYNC_FAILED_WARNING_PREFIX, MISSING_GRANT_IDENTIFIERS, RevokeOutcome, RevokeStage,
    WARNING_MAX_CHARS, WARNING_SEPARATOR, bound_warning, sanitize_failure_reason,
};
