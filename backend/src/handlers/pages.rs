use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{CreatePageRequest, PageType, UpdatePageRequest};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::Page;
use crate::services::content_service;
use crate::utils::validate_slug;

#[derive(Debug, Deserialize)]
pub struct PageListQuery {
    pub slug: Option<String>,
    pub published: Option<bool>,
    pub page_type: Option<PageType>,
}

/// List pages; `?slug=` narrows to the single matching page.
pub async fn list_pages(
    query: web::Query<PageListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if let Some(slug) = query.slug.as_deref() {
        let page = Page::find_by_slug(pool.get_ref(), slug)
            .await?
            .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
        return Ok(HttpResponse::Ok().json(page.to_response()));
    }

    let published_only = query.published.unwrap_or(true);

    let pages = Page::find_all(pool.get_ref(), published_only, query.page_type).await?;
    let responses: Vec<_> = pages.iter().map(Page::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn get_page_by_slug(
    slug: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let page = Page::find_by_slug(pool.get_ref(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    Ok(HttpResponse::Ok().json(page.to_response()))
}

pub async fn get_page(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let page = Page::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    Ok(HttpResponse::Ok().json(page.to_response()))
}

/// Create a page. An explicit slug must be well formed and free; a
/// taken slug is a conflict, never silently suffixed.
pub async fn create_page(
    request: web::Json<CreatePageRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    if let Some(explicit) = request.slug.as_deref() {
        validate_slug(explicit)?;
    }

    let slug = content_service::page_slug(pool.get_ref(), &request.title, request.slug.as_deref())
        .await?;

    let page = Page::create(
        pool.get_ref(),
        &request.title,
        &slug,
        &request.content,
        request.page_type.unwrap_or(PageType::Standard),
        request.is_published.unwrap_or(false),
        request.tour_price,
        request.tour_duration.as_deref(),
        request.tour_highlights.as_deref().unwrap_or(&[]),
        request.tour_inclusions.as_deref().unwrap_or(&[]),
        request.tour_rating,
        request.seo_title.clone(),
        request.seo_description.clone(),
    )
    .await?;

    info!(page_id = %page.id, slug = %page.slug, "page created");

    Ok(HttpResponse::Created().json(page.to_response()))
}

/// Partial update; the slug is immutable once assigned.
pub async fn update_page(
    id: web::Path<Uuid>,
    request: web::Json<UpdatePageRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let mut page = Page::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;

    let request = request.into_inner();
    if let Some(title) = request.title {
        page.title = title;
    }
    if let Some(content) = request.content {
        page.content = content;
    }
    if let Some(page_type) = request.page_type {
        page.page_type = page_type;
    }
    if let Some(is_published) = request.is_published {
        page.is_published = is_published;
    }
    if let Some(tour_price) = request.tour_price {
        page.tour_price = tour_price;
    }
    if let Some(tour_duration) = request.tour_duration {
        page.tour_duration = tour_duration;
    }
    if let Some(tour_highlights) = request.tour_highlights {
        page.tour_highlights = tour_highlights;
    }
    if let Some(tour_inclusions) = request.tour_inclusions {
        page.tour_inclusions = tour_inclusions;
    }
    if let Some(tour_rating) = request.tour_rating {
        page.tour_rating = tour_rating;
    }
    if let Some(seo_title) = request.seo_title {
        page.seo_title = seo_title;
    }
    if let Some(seo_description) = request.seo_description {
        page.seo_description = seo_description;
    }

    let updated = page.update(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated.to_response()))
}

pub async fn delete_page(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Page::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Page not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
