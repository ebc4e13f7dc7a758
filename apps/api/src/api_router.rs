use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use sharescope_core::AppError;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

mod cors;

use cors::build_cors_layer;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions",
            delete(handlers::permissions::revoke_permission_handler),
        )
        .route(
            "/api/permissions/revoke",
            post(handlers::permissions::revoke_permission_handler),
        )
        .route(
            "/api/permissions/revoke-attempts",
            get(handlers::permissions::list_revoke_attempts_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_admin,
        ));

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
