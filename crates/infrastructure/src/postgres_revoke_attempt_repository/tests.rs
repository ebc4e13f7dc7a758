use serde_json::json;
use sharescope_application::{NewRevokeAttempt, RevokeAttemptQuery, RevokeAttemptRepository};
use sharescope_core::ActorIdentity;
use sharescope_domain::RevokeOutcome;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresRevokeAttemptRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for revoke attempt log tests: {error}");
    }

    Some(pool)
}

fn attempt(drive_id: &str, item_id: &str, outcome: RevokeOutcome) -> NewRevokeAttempt {
    NewRevokeAttempt {
        actor: Some(ActorIdentity::new(
            None,
            Some("admin@contoso.com".to_owned()),
            None,
        )),
        drive_id: Some(drive_id.to_owned()),
        item_id: Some(item_id.to_owned()),
        permission_id: Some("p1".to_owned()),
        outcome,
        failure_reason: (outcome == RevokeOutcome::Failed)
            .then(|| "owner_permission_delete_blocked".to_owned()),
        warning: None,
        source: "item_permissions_revoke".to_owned(),
        details: json!({ "stage": "validation", "roles": ["owner"] }),
    }
}

#[tokio::test]
async fn appended_attempts_are_listed_newest_first_with_filters() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresRevokeAttemptRepository::new(pool);
    let drive_id = format!("drive-{}", uuid::Uuid::new_v4());

    for (item_id, outcome) in [
        ("i1", RevokeOutcome::Failed),
        ("i1", RevokeOutcome::Success),
        ("i2", RevokeOutcome::Success),
    ] {
        let result = repository
            .append_attempt(attempt(drive_id.as_str(), item_id, outcome))
            .await;
        assert!(result.is_ok());
    }

    let entries = repository
        .list_recent_attempts(RevokeAttemptQuery {
            limit: 10,
            offset: 0,
            drive_id: Some(drive_id.clone()),
            item_id: Some("i1".to_owned()),
            outcome: None,
        })
        .await
        .unwrap_or_default();

    assert_eq!(entries.len(), 2);
    assert!(entries[0].log_id > entries[1].log_id);
    assert_eq!(entries[1].outcome, RevokeOutcome::Failed);
    assert_eq!(
        entries[1].failure_reason.as_deref(),
        Some("owner_permission_delete_blocked")
    );
    assert_eq!(
        entries[1].actor.as_ref().and_then(ActorIdentity::upn),
        Some("admin@contoso.com")
    );
    assert_eq!(entries[1].details["stage"], "validation");

    let failed_only = repository
        .list_recent_attempts(RevokeAttemptQuery {
            limit: 10,
            offset: 0,
            drive_id: Some(drive_id),
            item_id: None,
            outcome: Some(RevokeOutcome::Failed),
        })
        .await
        .unwrap_or_default();
    assert_eq!(failed_only.len(), 1);
}
