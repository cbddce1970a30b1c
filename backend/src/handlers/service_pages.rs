use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{CreateServicePageRequest, UpdateServicePageRequest};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::ServicePage;
use crate::services::content_service;
use crate::utils::validate_slug;

#[derive(Debug, Deserialize)]
pub struct ServicePageListQuery {
    pub published: Option<bool>,
}

pub async fn list_service_pages(
    query: web::Query<ServicePageListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let published_only = query.published.unwrap_or(true);

    let pages = ServicePage::find_all(pool.get_ref(), published_only).await?;
    let responses: Vec<_> = pages.iter().map(ServicePage::to_response).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Public lookup by the (service, location) slug pair, e.g.
/// `/services/car-rental/dubai-marina`.
pub async fn get_service_page(
    path: web::Path<(String, String)>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let (service_slug, location_slug) = path.into_inner();

    let page = ServicePage::find_by_pair(pool.get_ref(), &service_slug, &location_slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Service page not found".to_string()))?;

    Ok(HttpResponse::Ok().json(page.to_response()))
}

pub async fn get_service_page_by_id(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let page = ServicePage::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service page not found".to_string()))?;

    Ok(HttpResponse::Ok().json(page.to_response()))
}

pub async fn create_service_page(
    request: web::Json<CreateServicePageRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    validate_slug(&request.service_slug)?;
    validate_slug(&request.location_slug)?;

    content_service::ensure_service_pair_free(
        pool.get_ref(),
        &request.service_slug,
        &request.location_slug,
    )
    .await?;

    let page = ServicePage::create(
        pool.get_ref(),
        &request.title,
        &request.service_slug,
        &request.location_slug,
        &request.content,
        request.is_published.unwrap_or(false),
        request.seo_title.clone(),
        request.seo_description.clone(),
    )
    .await?;

    info!(
        page_id = %page.id,
        service = %page.service_slug,
        location = %page.location_slug,
        "service page created"
    );

    Ok(HttpResponse::Created().json(page.to_response()))
}

/// Partial update; the slug pair is immutable once assigned.
pub async fn update_service_page(
    id: web::Path<Uuid>,
    request: web::Json<UpdateServicePageRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let mut page = ServicePage::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service page not found".to_string()))?;

    let request = request.into_inner();
    if let Some(title) = request.title {
        page.title = title;
    }
    if let Some(content) = request.content {
        page.content = content;
    }
    if let Some(is_published) = request.is_published {
        page.is_published = is_published;
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

pub async fn delete_service_page(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !ServicePage::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Service page not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
