use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{
    PaginatedResponse, SubscribeRequest, SubscriberResponse, SubscriberStatus,
    UpdateSubscriberRequest,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Pagination, Subscriber};

#[derive(Debug, Deserialize)]
pub struct SubscriberListQuery {
    pub status: Option<SubscriberStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Public signup. Re-subscribing a known address reactivates it, so
/// the endpoint is idempotent from the visitor's point of view.
pub async fn subscribe(
    request: web::Json<SubscribeRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let subscriber = Subscriber::subscribe(pool.get_ref(), &request.email).await?;

    info!(subscriber_id = %subscriber.id, "subscriber signed up");

    Ok(HttpResponse::Created().json(subscriber.to_response()))
}

pub async fn list_subscribers(
    query: web::Query<SubscriberListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let page = Pagination::new(query.limit, query.offset);

    let subscribers =
        Subscriber::find_all(pool.get_ref(), query.status, page.limit, page.offset).await?;
    let total = Subscriber::count(pool.get_ref(), query.status).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::<SubscriberResponse> {
        items: subscribers.iter().map(Subscriber::to_response).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn update_subscriber(
    id: web::Path<Uuid>,
    request: web::Json<UpdateSubscriberRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if Subscriber::find_by_id(pool.get_ref(), *id).await?.is_none() {
        return Err(AppError::NotFound("Subscriber not found".to_string()));
    }

    let subscriber = Subscriber::update_status(pool.get_ref(), *id, request.status).await?;

    Ok(HttpResponse::Ok().json(subscriber.to_response()))
}

pub async fn delete_subscriber(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Subscriber::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Subscriber not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
