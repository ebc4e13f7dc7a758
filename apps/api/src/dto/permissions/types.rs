use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identifiers of the permission to revoke. Accepted from the JSON body
/// and from the query string.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/revoke-permission-request.ts"
)]
pub struct RevokePermissionRequest {
    #[serde(default, alias = "drive_id")]
    #[ts(optional)]
    pub drive_id: Option<String>,
    #[serde(default, alias = "item_id")]
    #[ts(optional)]
    pub item_id: Option<String>,
    #[serde(default, alias = "permission_id")]
    #[ts(optional)]
    pub permission_id: Option<String>,
    #[serde(default)]
    #[ts(optional)]
    pub source: Option<String>,
}

/// Successful revoke response.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/revoke-permission-response.ts"
)]
pub struct RevokePermissionResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub warning: Option<String>,
}

/// Query parameters for forensic log listing.
#[derive(Debug, Default, Deserialize)]
pub struct RevokeAttemptListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub drive_id: Option<String>,
    pub item_id: Option<String>,
    pub outcome: Option<String>,
}

/// Operator identity recorded on a revoke attempt.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/actor-response.ts"
)]
pub struct ActorResponse {
    pub oid: Option<String>,
    pub upn: Option<String>,
    pub name: Option<String>,
}

/// API representation of one forensic revoke log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/revoke-attempt-response.ts"
)]
pub struct RevokeAttemptResponse {
    pub log_id: i64,
    pub occurred_at: String,
    pub actor: Option<ActorResponse>,
    pub drive_id: Option<String>,
    pub item_id: Option<String>,
    pub permission_id: Option<String>,
    pub outcome: String,
    pub failure_reason: Option<String>,
    pub warning: Option<String>,
    pub source: String,
    #[ts(type = "Record<string, unknown>")]
    pub details: serde_json::Value,
}
