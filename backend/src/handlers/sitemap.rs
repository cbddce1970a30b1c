use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::services::sitemap_service;

/// `GET /sitemap.xml`, rebuilt from live content on every request.
pub async fn sitemap_xml(
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    let xml = sitemap_service::generate(pool.get_ref(), &config.site_base_url).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(xml))
}
