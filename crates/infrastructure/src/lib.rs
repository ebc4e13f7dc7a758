//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod graph_directory_service;
mod graph_token_provider;
mod postgres_audit_repository;
mod postgres_permission_cache_repository;
mod postgres_revoke_attempt_repository;
#[cfg(test)]
mod test_support;

pub use graph_directory_service::GraphDirectoryService;
pub use graph_token_provider::{
    ClientCredentialsConfig, ClientCredentialsTokenProvider, GraphTokenSource,
};
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_permission_cache_repository::PostgresPermissionCacheRepository;
pub use postgres_revoke_attempt_repository::PostgresRevokeAttemptRepository;
