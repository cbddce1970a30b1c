use chrono::{DateTime, Utc};
use rental_platform_shared::{DisplayLocation, NotificationResponse, NotificationType};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub notification_type: NotificationType,
    pub display_locations: Vec<DisplayLocation>,
    pub is_active: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, title, message, notification_type, display_locations, is_active, \
     starts_at, ends_at, priority, created_at, updated_at";

impl Notification {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        message: &str,
        notification_type: NotificationType,
        display_locations: &[DisplayLocation],
        is_active: bool,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        priority: i32,
    ) -> Result<Self, AppError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            INSERT INTO notifications (title, message, notification_type, display_locations,
                is_active, starts_at, ends_at, priority)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title)
        .bind(message)
        .bind(notification_type)
        .bind(display_locations)
        .bind(is_active)
        .bind(starts_at)
        .bind(ends_at)
        .bind(priority)
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(notification)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications ORDER BY priority DESC, created_at DESC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    /// Visibility is computed, not stored: active, already started, and
    /// either open-ended or not yet ended.
    pub async fn find_visible(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Self>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(&format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE is_active = true AND starts_at <= $1 AND (ends_at IS NULL OR ends_at >= $1) \
             ORDER BY priority DESC, created_at DESC"
        ))
        .bind(now)
        .fetch_all(pool)
        .await?;

        Ok(notifications)
    }

    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let notification = sqlx::query_as::<_, Notification>(&format!(
            r#"
            UPDATE notifications SET
                title = $2, message = $3, notification_type = $4, display_locations = $5,
                is_active = $6, starts_at = $7, ends_at = $8, priority = $9, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.message)
        .bind(self.notification_type)
        .bind(&self.display_locations)
        .bind(self.is_active)
        .bind(self.starts_at)
        .bind(self.ends_at)
        .bind(self.priority)
        .fetch_one(pool)
        .await?;

        Ok(notification)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The window predicate, kept in one place so the SQL filter and
    /// any in-process checks cannot drift apart.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.starts_at <= now
            && self.ends_at.map_or(true, |ends_at| ends_at >= now)
    }

    pub fn to_response(&self) -> NotificationResponse {
        NotificationResponse {
            id: self.id,
            title: self.title.clone(),
            message: self.message.clone(),
            notification_type: self.notification_type,
            display_locations: self.display_locations.clone(),
            is_active: self.is_active,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            priority: self.priority,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn notification(
        is_active: bool,
        starts_offset_hours: i64,
        ends_offset_hours: Option<i64>,
    ) -> Notification {
        let now = Utc::now();
        Notification {
            id: Uuid::new_v4(),
            title: "Summer offer".to_string(),
            message: "20% off weekly rentals".to_string(),
            notification_type: NotificationType::Offer,
            display_locations: vec![DisplayLocation::Homepage],
            is_active,
            starts_at: now + Duration::hours(starts_offset_hours),
            ends_at: ends_offset_hours.map(|h| now + Duration::hours(h)),
            priority: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn visible_when_active_started_and_open_ended() {
        assert!(notification(true, -1, None).is_visible_at(Utc::now()));
    }

    #[test]
    fn visible_when_window_still_open() {
        assert!(notification(true, -2, Some(2)).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_when_inactive() {
        assert!(!notification(false, -1, None).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_before_start() {
        assert!(!notification(true, 1, None).is_visible_at(Utc::now()));
    }

    #[test]
    fn hidden_after_end() {
        assert!(!notification(true, -4, Some(-1)).is_visible_at(Utc::now()));
    }
}
