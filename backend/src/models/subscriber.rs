use chrono::{DateTime, Utc};
use rental_platform_shared::{SubscriberResponse, SubscriberStatus};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub status: SubscriberStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, email, status, created_at, updated_at";

impl Subscriber {
    /// Subscribe an email address. Re-subscribing an existing address
    /// reactivates the row instead of inserting a duplicate; the unique
    /// index on `email` makes the upsert possible.
    pub async fn subscribe(pool: &PgPool, email: &str) -> Result<Self, AppError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            r#"
            INSERT INTO subscribers (email)
            VALUES ($1)
            ON CONFLICT (email)
            DO UPDATE SET status = 'active', updated_at = NOW()
            RETURNING {COLUMNS}
            "#
        ))
        .bind(email.to_lowercase())
        .fetch_one(pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {COLUMNS} FROM subscribers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn find_all(
        pool: &PgPool,
        status: Option<SubscriberStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let subscribers = match status {
            Some(status) => {
                sqlx::query_as::<_, Subscriber>(&format!(
                    "SELECT {COLUMNS} FROM subscribers WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Subscriber>(&format!(
                    "SELECT {COLUMNS} FROM subscribers ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(subscribers)
    }

    pub async fn count(pool: &PgPool, status: Option<SubscriberStatus>) -> Result<i64, AppError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM subscribers WHERE status = $1")
                    .bind(status)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }

    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: SubscriberStatus,
    ) -> Result<Self, AppError> {
        let subscriber = sqlx::query_as::<_, Subscriber>(&format!(
            "UPDATE subscribers SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok(subscriber)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM subscribers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> SubscriberResponse {
        SubscriberResponse {
            id: self.id,
            email: self.email.clone(),
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
