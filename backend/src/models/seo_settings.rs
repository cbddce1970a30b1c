use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Site-wide SEO metadata. Effectively a singleton: reads take the
/// first row and create a default one when the table is empty.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct SeoSettings {
    pub id: Uuid,
    pub site_name: String,
    pub site_description: Option<String>,
    pub keywords: Vec<String>,
    pub google_analytics_id: Option<String>,
    pub default_og_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, site_name, site_description, keywords, google_analytics_id, \
     default_og_image, created_at, updated_at";

impl SeoSettings {
    pub async fn find_first(pool: &PgPool) -> Result<Option<Self>, AppError> {
        let settings = sqlx::query_as::<_, SeoSettings>(&format!(
            "SELECT {COLUMNS} FROM seo_settings ORDER BY created_at ASC LIMIT 1"
        ))
        .fetch_optional(pool)
        .await?;

        Ok(settings)
    }

    pub async fn first_or_create(pool: &PgPool, default_site_name: &str) -> Result<Self, AppError> {
        if let Some(settings) = Self::find_first(pool).await? {
            return Ok(settings);
        }

        let settings = sqlx::query_as::<_, SeoSettings>(&format!(
            "INSERT INTO seo_settings (site_name) VALUES ($1) RETURNING {COLUMNS}"
        ))
        .bind(default_site_name)
        .fetch_one(pool)
        .await?;

        Ok(settings)
    }

    /// Upsert the singleton row.
    pub async fn save(
        pool: &PgPool,
        site_name: &str,
        site_description: Option<&str>,
        keywords: &[String],
        google_analytics_id: Option<&str>,
        default_og_image: Option<&str>,
    ) -> Result<Self, AppError> {
        if let Some(existing) = Self::find_first(pool).await? {
            let settings = sqlx::query_as::<_, SeoSettings>(&format!(
                r#"
                UPDATE seo_settings SET
                    site_name = $2, site_description = $3, keywords = $4,
                    google_analytics_id = $5, default_og_image = $6, updated_at = NOW()
                WHERE id = $1
                RETURNING {COLUMNS}
                "#
            ))
            .bind(existing.id)
            .bind(site_name)
            .bind(site_description)
            .bind(keywords)
            .bind(google_analytics_id)
            .bind(default_og_image)
            .fetch_one(pool)
            .await?;

            return Ok(settings);
        }

        let settings = sqlx::query_as::<_, SeoSettings>(&format!(
            r#"
            INSERT INTO seo_settings (site_name, site_description, keywords,
                google_analytics_id, default_og_image)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(site_name)
        .bind(site_description)
        .bind(keywords)
        .bind(google_analytics_id)
        .bind(default_og_image)
        .fetch_one(pool)
        .await?;

        Ok(settings)
    }

    /// Degraded fallback used when the fetch itself fails; callers see
    /// a valid value, never the underlying error.
    pub fn default_for_site(site_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            site_name: site_name.to_string(),
            site_description: None,
            keywords: Vec::new(),
            google_analytics_id: None,
            default_og_image: None,
            created_at: now,
            updated_at: now,
        }
    }
}
