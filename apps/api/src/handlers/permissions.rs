use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query, State};
use tracing::debug;

use sharescope_application::RevokeAttemptQuery;
use sharescope_core::{ActorIdentity, AppError};
use sharescope_domain::RevokeOutcome;

use crate::dto::{
    RevokeAttemptListQuery, RevokeAttemptResponse, RevokePermissionRequest,
    RevokePermissionResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

/// Revokes one drive item permission. Identifiers may arrive in the JSON
/// body or the query string; body fields win.
pub async fn revoke_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<ActorIdentity>,
    query: Result<Query<RevokePermissionRequest>, QueryRejection>,
    body: Bytes,
) -> ApiResult<Json<RevokePermissionResponse>> {
    let from_query = match query {
        Ok(Query(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "ignoring unreadable revoke query string");
            RevokePermissionRequest::default()
        }
    };
    let request = request_from_body(&body).or(from_query);

    let success = state
        .revocation_service
        .revoke(request.into(), Some(&actor))
        .await?;

    Ok(Json(RevokePermissionResponse::from(success)))
}

pub async fn list_revoke_attempts_handler(
    State(state): State<AppState>,
    Query(query): Query<RevokeAttemptListQuery>,
) -> ApiResult<Json<Vec<RevokeAttemptResponse>>> {
    let outcome = match query.outcome.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(RevokeOutcome::parse(value).ok_or_else(|| {
            AppError::Validation(format!("unknown revoke outcome filter '{value}'"))
        })?),
    };

    let entries = state
        .revoke_attempt_service
        .list_recent(RevokeAttemptQuery {
            limit: query.limit.unwrap_or(0),
            offset: query.offset.unwrap_or(0),
            drive_id: query.drive_id,
            item_id: query.item_id,
            outcome,
        })
        .await?
        .into_iter()
        .map(RevokeAttemptResponse::from)
        .collect();

    Ok(Json(entries))
}

fn request_from_body(body: &[u8]) -> RevokePermissionRequest {
    if body.iter().all(u8::is_ascii_whitespace) {
        return RevokePermissionRequest::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|error| {
        debug!(%error, "revoke body is not a usable JSON object");
        RevokePermissionRequest::default()
    })
}
