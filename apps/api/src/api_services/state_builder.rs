use std::sync::Arc;

use sharescope_application::{ForensicLogger, RevocationService, RevokeAttemptService};
use sharescope_core::AppError;
use sharescope_infrastructure::{
    ClientCredentialsConfig, ClientCredentialsTokenProvider, GraphDirectoryService,
    PostgresAuditRepository, PostgresPermissionCacheRepository, PostgresRevokeAttemptRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let http_client = reqwest::Client::builder()
        .timeout(config.graph.timeout)
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

    let token_provider = Arc::new(ClientCredentialsTokenProvider::new(
        http_client.clone(),
        ClientCredentialsConfig {
            authority_url: config.graph.authority_url.clone(),
            tenant_id: config.graph.tenant_id.clone(),
            client_id: config.graph.client_id.clone(),
            client_secret: config.graph.client_secret.clone(),
        },
    )?);
    let directory = Arc::new(GraphDirectoryService::new(
        http_client,
        config.graph.base_url.clone(),
        token_provider,
    ));

    let revoke_attempt_repository = Arc::new(PostgresRevokeAttemptRepository::new(pool.clone()));
    let mut forensic_logger = ForensicLogger::new(revoke_attempt_repository.clone());
    if let Some(source) = &config.revoke_log_source {
        forensic_logger = forensic_logger.with_default_source(source.clone());
    }

    Ok(AppState {
        revocation_service: RevocationService::new(
            directory,
            Arc::new(PostgresPermissionCacheRepository::new(pool.clone())),
            Arc::new(PostgresAuditRepository::new(pool.clone())),
            forensic_logger,
        ),
        revoke_attempt_service: RevokeAttemptService::new(revoke_attempt_repository),
        admin_api_token: config.admin_api_token.clone(),
        postgres_pool: pool,
    })
}
