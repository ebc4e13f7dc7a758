use async_trait::async_trait;

use sharescope_core::AppResult;
use sharescope_domain::{GrantKey, PermissionGrant};

/// Port for the external directory service that owns live sharing state.
///
/// Implementations enforce their own client-side timeout; a timeout is
/// reported like any other failure.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Fetches the current state of one permission.
    async fn get_permission(&self, key: &GrantKey) -> AppResult<PermissionGrant>;

    /// Deletes one permission.
    async fn delete_permission(&self, key: &GrantKey) -> AppResult<()>;
}
