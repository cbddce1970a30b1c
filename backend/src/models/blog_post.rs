use chrono::{DateTime, Utc};
use rental_platform_shared::BlogPostResponse;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub views: i64,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub seo_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, title, slug, content, excerpt, categories, tags, is_published, \
     published_at, views, seo_title, seo_description, seo_keywords, created_at, updated_at";

impl BlogPost {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        slug: &str,
        content: &str,
        excerpt: Option<&str>,
        categories: &[String],
        tags: &[String],
        is_published: bool,
        published_at: Option<DateTime<Utc>>,
        seo_title: Option<String>,
        seo_description: Option<String>,
        seo_keywords: Option<String>,
    ) -> Result<Self, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            INSERT INTO blog_posts (title, slug, content, excerpt, categories, tags,
                is_published, published_at, seo_title, seo_description, seo_keywords)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(title)
        .bind(slug)
        .bind(content)
        .bind(excerpt)
        .bind(categories)
        .bind(tags)
        .bind(is_published)
        .bind(published_at)
        .bind(seo_title)
        .bind(seo_description)
        .bind(seo_keywords)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            "SELECT {COLUMNS} FROM blog_posts WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Slugs the suffix policy has to avoid: the base itself plus any
    /// suffixed sibling. `exclude` drops the post being re-slugged so
    /// its own slug does not count as a collision.
    pub async fn slugs_in_family(
        pool: &PgPool,
        base: &str,
        exclude: Option<Uuid>,
    ) -> Result<Vec<String>, AppError> {
        let slugs = sqlx::query_scalar::<_, String>(
            "SELECT slug FROM blog_posts WHERE (slug = $1 OR slug LIKE $1 || '-%') \
             AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(base)
        .bind(exclude)
        .fetch_all(pool)
        .await?;

        Ok(slugs)
    }

    pub async fn find_all(
        pool: &PgPool,
        published_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let posts = if published_only {
            sqlx::query_as::<_, BlogPost>(&format!(
                "SELECT {COLUMNS} FROM blog_posts WHERE is_published = true \
                 ORDER BY published_at DESC NULLS LAST LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, BlogPost>(&format!(
                "SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        };

        Ok(posts)
    }

    pub async fn count(pool: &PgPool, published_only: bool) -> Result<i64, AppError> {
        let count: i64 = if published_only {
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE is_published = true")
                .fetch_one(pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
                .fetch_one(pool)
                .await?
        };

        Ok(count)
    }

    /// The one mutating side effect of a public read path.
    pub async fn increment_views(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE blog_posts SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let post = sqlx::query_as::<_, BlogPost>(&format!(
            r#"
            UPDATE blog_posts SET
                title = $2, slug = $3, content = $4, excerpt = $5, categories = $6, tags = $7,
                is_published = $8, published_at = $9, seo_title = $10, seo_description = $11,
                seo_keywords = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.title)
        .bind(&self.slug)
        .bind(&self.content)
        .bind(&self.excerpt)
        .bind(&self.categories)
        .bind(&self.tags)
        .bind(self.is_published)
        .bind(self.published_at)
        .bind(&self.seo_title)
        .bind(&self.seo_description)
        .bind(&self.seo_keywords)
        .fetch_one(pool)
        .await?;

        Ok(post)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> BlogPostResponse {
        BlogPostResponse {
            id: self.id,
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            excerpt: self.excerpt.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            is_published: self.is_published,
            published_at: self.published_at,
            views: self.views,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            seo_keywords: self.seo_keywords.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
