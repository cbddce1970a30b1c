use chrono::{DateTime, Utc};
use rental_platform_shared::ServicePageResponse;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Local-SEO landing page keyed by the (service, location) slug pair.
/// The compound unique index on that pair is the one genuine
/// compound-uniqueness invariant in the data set.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ServicePage {
    pub id: Uuid,
    pub title: String,
    pub service_slug: String,
    pub location_slug: String,
    pub content: String,
    pub is_published: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, title, service_slug, location_slug, content, is_published, \
     seo_title, seo_description, created_at, updated_at";

impl ServicePage {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        service_slug: &str,
        location_slug: &str,
        content: &str,
        is_published: bool,
        seo_title: Option<String>,
        seo_description: Option<String>,
    ) -> Result<Self, AppError> {
        let page = sqlx::query_as::<_, ServicePage>(&format!(
            r#"
            INSERT INTO service_pages (title, service_slug, location_slug, content,
                is_published, seo_title, seo_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title)
        .bind(service_slug)
        .bind(location_slug)
        .bind(content)
        .bind(is_published)
        .bind(seo_title)
        .bind(seo_description)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let page = sqlx::query_as::<_, ServicePage>(&format!(
            "SELECT {COLUMNS} FROM service_pages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(page)
    }

    pub async fn find_by_pair(
        pool: &PgPool,
        service_slug: &str,
        location_slug: &str,
    ) -> Result<Option<Self>, AppError> {
        let page = sqlx::query_as::<_, ServicePage>(&format!(
            "SELECT {COLUMNS} FROM service_pages WHERE service_slug = $1 AND location_slug = $2"
        ))
        .bind(service_slug)
        .bind(location_slug)
        .fetch_optional(pool)
        .await?;

        Ok(page)
    }

    pub async fn pair_exists(
        pool: &PgPool,
        service_slug: &str,
        location_slug: &str,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM service_pages \
             WHERE service_slug = $1 AND location_slug = $2)",
        )
        .bind(service_slug)
        .bind(location_slug)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub async fn find_all(pool: &PgPool, published_only: bool) -> Result<Vec<Self>, AppError> {
        let pages = if published_only {
            sqlx::query_as::<_, ServicePage>(&format!(
                "SELECT {COLUMNS} FROM service_pages WHERE is_published = true \
                 ORDER BY service_slug, location_slug"
            ))
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, ServicePage>(&format!(
                "SELECT {COLUMNS} FROM service_pages ORDER BY service_slug, location_slug"
            ))
            .fetch_all(pool)
            .await?
        };

        Ok(pages)
    }

    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let page = sqlx::query_as::<_, ServicePage>(&format!(
            r#"
            UPDATE service_pages SET
                title = $2, content = $3, is_published = $4, seo_title = $5,
                seo_description = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.content)
        .bind(self.is_published)
        .bind(&self.seo_title)
        .bind(&self.seo_description)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM service_pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> ServicePageResponse {
        ServicePageResponse {
            id: self.id,
            title: self.title.clone(),
            service_slug: self.service_slug.clone(),
            location_slug: self.location_slug.clone(),
            content: self.content.clone(),
            is_published: self.is_published,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
