use chrono::{DateTime, Utc};
use rental_platform_shared::{PageResponse, PageType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Generic CMS page. The `tour` variant carries the extra pricing and
/// itinerary columns; they stay NULL/empty for standard pages.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub page_type: PageType,
    pub is_published: bool,
    pub tour_price: Option<Decimal>,
    pub tour_duration: Option<String>,
    pub tour_highlights: Vec<String>,
    pub tour_inclusions: Vec<String>,
    pub tour_rating: Option<f64>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, title, slug, content, page_type, is_published, tour_price, \
     tour_duration, tour_highlights, tour_inclusions, tour_rating, seo_title, \
     seo_description, created_at, updated_at";

impl Page {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        slug: &str,
        content: &str,
        page_type: PageType,
        is_published: bool,
        tour_price: Option<Decimal>,
        tour_duration: Option<&str>,
        tour_highlights: &[String],
        tour_inclusions: &[String],
        tour_rating: Option<f64>,
        seo_title: Option<String>,
        seo_description: Option<String>,
    ) -> Result<Self, AppError> {
        let page = sqlx::query_as::<_, Page>(&format!(
            r#"
            INSERT INTO pages (title, slug, content, page_type, is_published, tour_price,
                tour_duration, tour_highlights, tour_inclusions, tour_rating,
                seo_title, seo_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(page_type)
        .bind(is_published)
        .bind(tour_price)
        .bind(tour_duration)
        .bind(tour_highlights)
        .bind(tour_inclusions)
        .bind(tour_rating)
        .bind(seo_title)
        .bind(seo_description)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let page = sqlx::query_as::<_, Page>(&format!("SELECT {COLUMNS} FROM pages WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(page)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, AppError> {
        let page =
            sqlx::query_as::<_, Page>(&format!("SELECT {COLUMNS} FROM pages WHERE slug = $1"))
                .bind(slug)
                .fetch_optional(pool)
                .await?;

        Ok(page)
    }

    /// Pre-write existence check; the unique index backstops the race.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pages WHERE slug = $1)")
            .bind(slug)
            .fetch_one(pool)
            .await?;

        Ok(exists)
    }

    pub async fn find_all(
        pool: &PgPool,
        published_only: bool,
        page_type: Option<PageType>,
    ) -> Result<Vec<Self>, AppError> {
        let pages = match (published_only, page_type) {
            (true, Some(pt)) => {
                sqlx::query_as::<_, Page>(&format!(
                    "SELECT {COLUMNS} FROM pages WHERE is_published = true AND page_type = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(pt)
                .fetch_all(pool)
                .await?
            }
            (true, None) => {
                sqlx::query_as::<_, Page>(&format!(
                    "SELECT {COLUMNS} FROM pages WHERE is_published = true ORDER BY created_at DESC"
                ))
                .fetch_all(pool)
                .await?
            }
            (false, Some(pt)) => {
                sqlx::query_as::<_, Page>(&format!(
                    "SELECT {COLUMNS} FROM pages WHERE page_type = $1 ORDER BY created_at DESC"
                ))
                .bind(pt)
                .fetch_all(pool)
                .await?
            }
            (false, None) => {
                sqlx::query_as::<_, Page>(&format!(
                    "SELECT {COLUMNS} FROM pages ORDER BY created_at DESC"
                ))
                .fetch_all(pool)
                .await?
            }
        };

        Ok(pages)
    }

    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let page = sqlx::query_as::<_, Page>(&format!(
            r#"
            UPDATE pages SET
                title = $2, content = $3, page_type = $4, is_published = $5, tour_price = $6,
                tour_duration = $7, tour_highlights = $8, tour_inclusions = $9, tour_rating = $10,
                seo_title = $11, seo_description = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.content)
        .bind(self.page_type)
        .bind(self.is_published)
        .bind(self.tour_price)
        .bind(&self.tour_duration)
        .bind(&self.tour_highlights)
        .bind(&self.tour_inclusions)
        .bind(self.tour_rating)
        .bind(&self.seo_title)
        .bind(&self.seo_description)
        .fetch_one(pool)
        .await?;

        Ok(page)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> PageResponse {
        PageResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            page_type: self.page_type,
            is_published: self.is_published,
            tour_price: self.tour_price,
            tour_duration: self.tour_duration.clone(),
            tour_highlights: self.tour_highlights.clone(),
            tour_inclusions: self.tour_inclusions.clone(),
            tour_rating: self.tour_rating,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
