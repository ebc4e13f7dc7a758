use sharescope_core::ActorIdentity;

use super::types::{
    ActorResponse, RevokeAttemptResponse, RevokePermissionRequest, RevokePermissionResponse,
};

impl From<&ActorIdentity> for ActorResponse {
    fn from(value: &ActorIdentity) -> Self {
        Self {
            oid: value.oid().map(str::to_owned),
            upn: value.upn().map(str::to_owned),
            name: value.name().map(str::to_owned),
        }
    }
}

impl From<sharescope_application::RevokeAttemptEntry> for RevokeAttemptResponse {
    fn from(value: sharescope_application::RevokeAttemptEntry) -> Self {
        Self {
            log_id: value.log_id,
            occurred_at: value.occurred_at,
            actor: value.actor.as_ref().map(ActorResponse::from),
            drive_id: value.drive_id,
            item_id: value.item_id,
            permission_id: value.permission_id,
            outcome: value.outcome.as_str().to_owned(),
            failure_reason: value.failure_reason,
            warning: value.warning,
            source: value.source,
            details: value.details,
        }
    }
}

impl From<sharescope_application::RevokeSuccess> for RevokePermissionResponse {
    fn from(value: sharescope_application::RevokeSuccess) -> Self {
        Self {
            ok: true,
            warning: value.warning,
        }
    }
}

impl RevokePermissionRequest {
    /// Fills fields missing or blank in `self` with values from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            drive_id: non_blank(self.drive_id).or(fallback.drive_id),
            item_id: non_blank(self.item_id).or(fallback.item_id),
            permission_id: non_blank(self.permission_id).or(fallback.permission_id),
            source: non_blank(self.source).or(fallback.source),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<RevokePermissionRequest> for sharescope_application::RevokePermissionInput {
    fn from(value: RevokePermissionRequest) -> Self {
        Self {
            drive_id: value.drive_id,
            item_id: value.item_id,
            permission_id: value.permission_id,
            source: value.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RevokePermissionRequest;

    fn request(drive_id: &str, item_id: &str, permission_id: &str) -> RevokePermissionRequest {
        RevokePermissionRequest {
            drive_id: Some(drive_id.to_owned()),
            item_id: Some(item_id.to_owned()),
            permission_id: Some(permission_id.to_owned()),
            source: None,
        }
    }

    #[test]
    fn blank_body_fields_fall_back_to_query_values() {
        let merged = request("", "  ", "p-body").or(request("d1", "i1", "p1"));

        assert_eq!(merged.drive_id.as_deref(), Some("d1"));
        assert_eq!(merged.item_id.as_deref(), Some("i1"));
        assert_eq!(merged.permission_id.as_deref(), Some("p-body"));
    }
}
