use std::sync::Arc;

use sharescope_core::AppResult;

use crate::{RevokeAttemptEntry, RevokeAttemptQuery, RevokeAttemptRepository};

const DEFAULT_LIST_LIMIT: usize = 50;
const MAX_LIST_LIMIT: usize = 500;

/// Read access to the forensic revoke log.
#[derive(Clone)]
pub struct RevokeAttemptService {
    repository: Arc<dyn RevokeAttemptRepository>,
}

impl RevokeAttemptService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(repository: Arc<dyn RevokeAttemptRepository>) -> Self {
        Self { repository }
    }

    /// Returns the most recent attempts matching the query, newest first.
    pub async fn list_recent(
        &self,
        mut query: RevokeAttemptQuery,
    ) -> AppResult<Vec<RevokeAttemptEntry>> {
        query.limit = match query.limit {
            0 => DEFAULT_LIST_LIMIT,
            limit => limit.min(MAX_LIST_LIMIT),
        };
        query.drive_id = query.drive_id.filter(|value| !value.trim().is_empty());
        query.item_id = query.item_id.filter(|value| !value.trim().is_empty());

        self.repository.list_recent_attempts(query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use sharescope_core::AppResult;

    use crate::{NewRevokeAttempt, RevokeAttemptEntry, RevokeAttemptQuery, RevokeAttemptRepository};

    use super::RevokeAttemptService;

    #[derive(Default)]
    struct RecordingRevokeAttemptRepository {
        queries: Mutex<Vec<RevokeAttemptQuery>>,
    }

    #[async_trait]
    impl RevokeAttemptRepository for RecordingRevokeAttemptRepository {
        async fn append_attempt(&self, _attempt: NewRevokeAttempt) -> AppResult<()> {
            Ok(())
        }

        async fn list_recent_attempts(
            &self,
            query: RevokeAttemptQuery,
        ) -> AppResult<Vec<RevokeAttemptEntry>> {
            self.queries.lock().await.push(query);
            Ok(Vec::new())
        }
    }

    fn query(limit: usize) -> RevokeAttemptQuery {
        RevokeAttemptQuery {
            limit,
            offset: 0,
            drive_id: Some(" ".to_owned()),
            item_id: Some("i1".to_owned()),
            outcome: None,
        }
    }

    #[tokio::test]
    async fn limit_is_defaulted_and_clamped() {
        let repository = Arc::new(RecordingRevokeAttemptRepository::default());
        let service = RevokeAttemptService::new(repository.clone());

        assert!(service.list_recent(query(0)).await.is_ok());
        assert!(service.list_recent(query(10_000)).await.is_ok());

        let queries = repository.queries.lock().await;
        assert_eq!(queries[0].limit, 50);
        assert_eq!(queries[1].limit, 500);
        assert_eq!(queries[0].drive_id, None);
        assert_eq!(queries[0].item_id.as_deref(), Some("i1"));
    }
}
