use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use rental_platform_shared::{
    BlogPostResponse, CreateBlogPostRequest, PaginatedResponse, UpdateBlogPostRequest,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{BlogPost, Pagination};
use crate::services::content_service;

#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Public listing defaults to published posts; the admin panel passes
/// `?published=false` to see drafts too.
pub async fn list_posts(
    query: web::Query<BlogListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let published_only = query.published.unwrap_or(true);
    let page = Pagination::new(query.limit, query.offset);

    let posts = BlogPost::find_all(pool.get_ref(), published_only, page.limit, page.offset).await?;
    let total = BlogPost::count(pool.get_ref(), published_only).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::<BlogPostResponse> {
        items: posts.iter().map(BlogPost::to_response).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

/// Public read by slug; bumps the view counter as a side effect.
pub async fn get_post_by_slug(
    slug: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let post = BlogPost::find_by_slug(pool.get_ref(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

    BlogPost::increment_views(pool.get_ref(), post.id).await?;

    Ok(HttpResponse::Ok().json(post.to_response()))
}

pub async fn get_post(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let post = BlogPost::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post.to_response()))
}

/// Create a post. The slug is derived from the title with a numeric
/// suffix on collision; publishing stamps `published_at`.
pub async fn create_post(
    request: web::Json<CreateBlogPostRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let slug = content_service::unique_blog_slug(pool.get_ref(), &request.title).await?;
    let is_published = request.is_published.unwrap_or(false);
    let published_at = is_published.then(Utc::now);

    // Blank SEO fields fall back to the post's own content.
    let seo_title = request
        .seo_title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| request.title.clone());
    let seo_description = request
        .seo_description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .or_else(|| request.excerpt.clone());
    let seo_keywords = request
        .seo_keywords
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| (!request.tags.is_empty()).then(|| request.tags.join(", ")));

    let post = BlogPost::create(
        pool.get_ref(),
        &request.title,
        &slug,
        &request.content,
        request.excerpt.as_deref(),
        &request.categories,
        &request.tags,
        is_published,
        published_at,
        Some(seo_title),
        seo_description,
        seo_keywords,
    )
    .await?;

    info!(post_id = %post.id, slug = %post.slug, "blog post created");

    Ok(HttpResponse::Created().json(post.to_response()))
}

/// Partial update. A changed title regenerates the slug through the
/// same suffix policy (the post's own slug is not a collision); an
/// unchanged title keeps it. Flipping to published stamps
/// `published_at` the first time only.
pub async fn update_post(
    id: web::Path<Uuid>,
    request: web::Json<UpdateBlogPostRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let mut post = BlogPost::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog post not found".to_string()))?;

    let request = request.into_inner();
    if let Some(title) = request.title {
        if title != post.title {
            post.slug =
                content_service::unique_blog_slug_excluding(pool.get_ref(), &title, Some(post.id))
                    .await?;
        }
        post.title = title;
    }
    if let Some(content) = request.content {
        post.content = content;
    }
    if let Some(excerpt) = request.excerpt {
        post.excerpt = excerpt;
    }
    if let Some(categories) = request.categories {
        post.categories = categories;
    }
    if let Some(tags) = request.tags {
        post.tags = tags;
    }
    if let Some(is_published) = request.is_published {
        if is_published && !post.is_published && post.published_at.is_none() {
            post.published_at = Some(Utc::now());
        }
        post.is_published = is_published;
    }
    if let Some(seo_title) = request.seo_title {
        post.seo_title = seo_title;
    }
    if let Some(seo_description) = request.seo_description {
        post.seo_description = seo_description;
    }
    if let Some(seo_keywords) = request.seo_keywords {
        post.seo_keywords = seo_keywords;
    }

    let updated = post.update(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated.to_response()))
}

pub async fn delete_post(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !BlogPost::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Blog post not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
