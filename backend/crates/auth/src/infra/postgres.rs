//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user_record::UserRecord;
use crate::domain::repository::{StoreResult, UserRecordRepository};
use crate::domain::value_object::{user_record_id::UserRecordId, username::Username};

/// PostgreSQL-backed user record repository
#[derive(Clone)]
pub struct PgUserRecordRepository {
    pool: PgPool,
}

impl PgUserRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRecordRepository for PgUserRecordRepository {
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query_as::<_, UserRecordRow>(
            r#"
            SELECT
                user_id,
                username,
                token,
                created_at
            FROM user_records
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecordRow::into_record))
    }

    async fn exists_by_username(&self, username: &Username) -> StoreResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_records WHERE username_canonical = $1)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, record: &UserRecord) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_records (
                user_id,
                username,
                username_canonical,
                token,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.user_id.as_uuid())
        .bind(record.username.as_str())
        .bind(record.username.canonical())
        .bind(&record.token)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<bool> {
        let deleted = sqlx::query("DELETE FROM user_records WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRecordRow {
    user_id: Uuid,
    username: String,
    token: String,
    created_at: DateTime<Utc>,
}

impl UserRecordRow {
    fn into_record(self) -> UserRecord {
        UserRecord {
            user_id: UserRecordId::from_uuid(self.user_id),
            username: Username::from_db(self.username),
            token: self.token,
            created_at: self.created_at,
        }
    }
}
