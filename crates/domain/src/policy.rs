//! Revocation policy guard.
//!
//! Decides whether a freshly fetched permission may be deleted through the
//! item permissions surface. The decision is a pure function of the grant
//! and must be recomputed on every request.

use serde_json::{Value, json};

use crate::PermissionGrant;

/// Reason a revocation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// The permission is inherited and must be removed on its source item.
    InheritedPermission,
    /// The permission carries an owner role.
    OwnerPermission,
}

impl DenyReason {
    /// Returns the stable wire code for this reason.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InheritedPermission => "inherited_permission_delete_blocked",
            Self::OwnerPermission => "owner_permission_delete_blocked",
        }
    }

    /// Returns the disqualifying fact for forensic details.
    #[must_use]
    pub fn offending_details(&self, grant: &PermissionGrant) -> Value {
        match self {
            Self::InheritedPermission => json!({ "inheritedFrom": grant.inherited_from }),
            Self::OwnerPermission => json!({ "roles": grant.roles }),
        }
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Deletion may proceed.
    Allow,
    /// Deletion is refused.
    Deny(DenyReason),
}

/// Evaluates whether the given permission may be revoked.
#[must_use]
pub fn evaluate_revocation(grant: &PermissionGrant) -> PolicyDecision {
    if grant.inherited_from.is_some() {
        return PolicyDecision::Deny(DenyReason::InheritedPermission);
    }

    if grant
        .roles
        .iter()
        .any(|role| role.to_ascii_lowercase().contains("owner"))
    {
        return PolicyDecision::Deny(DenyReason::OwnerPermission);
    }

    PolicyDecision::Allow
}
