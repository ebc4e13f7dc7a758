use sharescope_application::{RevocationService, RevokeAttemptService};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub revocation_service: RevocationService,
    pub revoke_attempt_service: RevokeAttemptService,
    pub admin_api_token: String,
    pub postgres_pool: PgPool,
}
