use async_trait::async_trait;

use sharescope_core::AppResult;
use sharescope_domain::GrantKey;

/// Port for the locally cached projection of drive item permissions.
#[async_trait]
pub trait PermissionCacheRepository: Send + Sync {
    /// Removes the cached permission and its grant rows, clears the parent
    /// item's permission sync error and stamps its last sync time.
    ///
    /// Either every write persists or none does.
    async fn remove_permission(&self, key: &GrantKey) -> AppResult<()>;
}
