//! SQLite-backed interaction log storage.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use std::time::Duration;
use uuid::Uuid;

use socialsim_domain::{InteractionLog, InteractionLogId, Mood, UserId};

use crate::infrastructure::ports::{InteractionLogRepo, RepoError};

/// SQLite implementation for per-request analytics records.
pub struct SqliteInteractionLogRepo {
    pool: SqlitePool,
}

impl SqliteInteractionLogRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("interaction_logs", e))?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database, kept on a single connection.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("interaction_logs", e))?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS interaction_logs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                scenario TEXT NOT NULL,
                mood TEXT NOT NULL DEFAULT '',
                flagged INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("interaction_logs", e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_interaction_logs_user ON interaction_logs (user_id, created_at)",
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("interaction_logs", e))?;

        Ok(Self { pool })
    }
}

fn row_to_log(row: &sqlx::sqlite::SqliteRow) -> Result<InteractionLog, RepoError> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let mood: String = row.get("mood");
    let flagged: i64 = row.get("flagged");
    let created_at: String = row.get("created_at");

    let id = Uuid::parse_str(&id).map_err(RepoError::serialization)?;
    let user_id = UserId::new(user_id)
        .ok_or_else(|| RepoError::serialization("blank user_id in interaction_logs"))?;
    let mood = if mood.is_empty() {
        None
    } else {
        Some(mood.parse::<Mood>().map_err(RepoError::serialization)?)
    };
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(RepoError::serialization)?
        .with_timezone(&Utc);

    Ok(InteractionLog {
        id: InteractionLogId::from_uuid(id),
        user_id,
        scenario: row.get("scenario"),
        mood,
        flagged: flagged != 0,
        created_at,
    })
}

#[async_trait]
impl InteractionLogRepo for SqliteInteractionLogRepo {
    async fn save(&self, log: &InteractionLog) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO interaction_logs (id, user_id, scenario, mood, flagged, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.id.to_string())
        .bind(log.user_id.as_str())
        .bind(&log.scenario)
        .bind(log.mood_label())
        .bind(log.flagged)
        .bind(log.created_at.to_rfc3339_opts(SecondsFormat::Micros, true))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("interaction_logs", e))?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<InteractionLog>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, scenario, mood, flagged, created_at
            FROM interaction_logs
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("interaction_logs", e))?;

        rows.iter().map(row_to_log).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use socialsim_domain::{ErrorDetail, OrchestrationResult};

    fn user(id: &str) -> UserId {
        UserId::new(id).expect("valid user id")
    }

    #[tokio::test]
    async fn test_save_and_list_round_trip() {
        let repo = SqliteInteractionLogRepo::in_memory()
            .await
            .expect("in-memory db");
        let t0 = Utc
            .with_ymd_and_hms(2024, 5, 10, 9, 0, 0)
            .single()
            .expect("valid date");

        let flagged = InteractionLog::from_result(
            user("kid-1"),
            "Classroom",
            &OrchestrationResult::flagged(),
            t0,
        );
        let success = InteractionLog::from_result(
            user("kid-1"),
            "Grocery Store",
            &OrchestrationResult::success("Hi!", Mood::Happy, vec![]),
            t0 + chrono::Duration::minutes(1),
        );
        let other_user = InteractionLog::from_result(
            user("kid-2"),
            "Playground",
            &OrchestrationResult::error(ErrorDetail::Timeout),
            t0,
        );

        for log in [&flagged, &success, &other_user] {
            repo.save(log).await.expect("saved");
        }

        let logs = repo.list_for_user(&user("kid-1")).await.expect("listed");

        assert_eq!(logs.len(), 2);
        // Newest first
        assert_eq!(logs[0], success);
        assert_eq!(logs[1], flagged);
        assert_eq!(logs[1].mood, None);
        assert!(logs[1].flagged);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_logs() {
        let repo = SqliteInteractionLogRepo::in_memory()
            .await
            .expect("in-memory db");
        let logs = repo.list_for_user(&user("nobody")).await.expect("listed");
        assert!(logs.is_empty());
    }
}
