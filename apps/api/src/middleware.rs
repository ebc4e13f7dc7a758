use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use sharescope_core::{ActorIdentity, AppError};

use crate::error::ApiResult;
use crate::state::AppState;

pub const ACTOR_OID_HEADER: &str = "x-ms-client-principal-id";
pub const ACTOR_UPN_HEADER: &str = "x-ms-client-principal-name";
pub const ACTOR_NAME_HEADER: &str = "x-actor-name";

/// Rejects requests without the configured admin bearer token and attaches
/// the operator identity forwarded by the fronting proxy.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let presented = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    if !tokens_match(presented, &state.admin_api_token) {
        return Err(AppError::Unauthorized("invalid admin token".to_owned()).into());
    }

    let actor = actor_from_headers(request.headers());
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn tokens_match(presented: &str, expected: &str) -> bool {
    let presented = presented.as_bytes();
    let expected = expected.as_bytes();
    if presented.len() != expected.len() {
        return false;
    }

    presented
        .iter()
        .zip(expected)
        .fold(0_u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}

pub(crate) fn actor_from_headers(headers: &HeaderMap) -> ActorIdentity {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    ActorIdentity::new(
        header_value(ACTOR_OID_HEADER),
        header_value(ACTOR_UPN_HEADER),
        header_value(ACTOR_NAME_HEADER),
    )
}
