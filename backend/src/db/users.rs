use async_trait::async_trait;
use sqlx::PgPool;

use crate::constants::MAX_CANDIDATE_POOL;
use crate::models::{Candidate, DirectoryUser, UserStatus};
use crate::services::UserDirectory;

/// User directory backed by the `directory_users` and `group_members` tables.
#[derive(Debug, Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn load_candidate_pool(&self, group_id: &str) -> anyhow::Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT u.id, u.is_bot
            FROM group_members m
            JOIN directory_users u ON u.id = m.user_id
            WHERE m.group_id = $1
            ORDER BY u.username
            LIMIT $2
            "#
        )
        .bind(group_id)
        .bind(MAX_CANDIDATE_POOL)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    async fn get_status(&self, user_id: &str) -> anyhow::Result<UserStatus> {
        let status = sqlx::query_scalar::<_, String>(
            "SELECT status FROM directory_users WHERE id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(status
            .map(|raw| UserStatus::parse(&raw))
            .unwrap_or(UserStatus::Unknown))
    }

    async fn user_by_id(&self, user_id: &str) -> anyhow::Result<Option<DirectoryUser>> {
        let user = sqlx::query_as::<_, DirectoryUser>(
            "SELECT id, username, is_bot FROM directory_users WHERE id = $1"
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn user_by_username(&self, username: &str) -> anyhow::Result<Option<DirectoryUser>> {
        let user = sqlx::query_as::<_, DirectoryUser>(
            "SELECT id, username, is_bot FROM directory_users WHERE LOWER(username) = LOWER($1)"
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
