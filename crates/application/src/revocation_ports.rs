mod audit;
mod cache;
mod directory;
mod revoke_attempts;

pub use audit::{AuditEvent, AuditRepository};
pub use cache::PermissionCacheRepository;
pub use directory::DirectoryService;
pub use revoke_attempts::{
    NewRevokeAttempt, RevokeAttemptEntry, RevokeAttemptQuery, RevokeAttemptRepository,
};
