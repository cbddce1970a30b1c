use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::SaveSeoSettingsRequest;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::error::AppError;
use crate::middleware::AuthenticatedAdmin;
use crate::services::SeoService;

/// Public read, served through the TTL cache. This never fails: a
/// storage problem degrades to the built-in defaults.
pub async fn get_seo_settings(
    pool: web::Data<PgPool>,
    seo_service: web::Data<SeoService>,
) -> Result<HttpResponse, AppError> {
    let settings = seo_service.get_settings(pool.get_ref()).await;

    Ok(HttpResponse::Ok().json(settings))
}

/// Admin write; invalidates the cache so the next read sees it.
pub async fn save_seo_settings(
    admin: AuthenticatedAdmin,
    request: web::Json<SaveSeoSettingsRequest>,
    pool: web::Data<PgPool>,
    seo_service: web::Data<SeoService>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let settings = seo_service.save_settings(pool.get_ref(), &request).await?;

    info!(site_name = %settings.site_name, by = %admin.email, "seo settings saved");

    Ok(HttpResponse::Ok().json(settings))
}
