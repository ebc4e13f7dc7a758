//! Application services and ports.

#![forbid(unsafe_code)]

mod forensic_logger;
mod revocation_ports;
mod revocation_service;
mod revoke_attempt_service;

pub use forensic_logger::{DEFAULT_REVOKE_SOURCE, ForensicLogger, RevokeAttemptInput};
pub use revocation_ports::{
    AuditEvent, AuditRepository, DirectoryService, NewRevokeAttempt, PermissionCacheRepository,
    RevokeAttemptEntry, RevokeAttemptQuery, RevokeAttemptRepository,
};
pub use revocation_service::{RevocationService, RevokePermissionInput, RevokeSuccess};
pub use revoke_attempt_service::RevokeAttemptService;
