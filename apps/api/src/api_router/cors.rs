use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use sharescope_core::AppError;
use tower_http::cors::CorsLayer;

use crate::middleware::{ACTOR_NAME_HEADER, ACTOR_OID_HEADER, ACTOR_UPN_HEADER};

pub(super) fn build_cors_layer(frontend_url: &str) -> Result<CorsLayer, AppError> {
    Ok(CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static(ACTOR_OID_HEADER),
            HeaderName::from_static(ACTOR_UPN_HEADER),
            HeaderName::from_static(ACTOR_NAME_HEADER),
        ]))
}
