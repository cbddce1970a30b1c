use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use rental_platform_shared::{CreateNotificationRequest, UpdateNotificationRequest};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::Notification;

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub active: Option<bool>,
}

/// `?active=true` returns only notifications currently inside their
/// display window; without it the full admin list comes back.
pub async fn list_notifications(
    query: web::Query<NotificationListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let notifications = if query.active.unwrap_or(false) {
        Notification::find_visible(pool.get_ref(), Utc::now()).await?
    } else {
        Notification::find_all(pool.get_ref()).await?
    };

    let responses: Vec<_> = notifications
        .iter()
        .map(Notification::to_response)
        .collect();

    Ok(HttpResponse::Ok().json(responses))
}

pub async fn get_notification(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let notification = Notification::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    Ok(HttpResponse::Ok().json(notification.to_response()))
}

pub async fn create_notification(
    request: web::Json<CreateNotificationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    if let Some(ends_at) = request.ends_at {
        if ends_at <= request.starts_at {
            return Err(AppError::Validation(
                "ends_at must be after starts_at".to_string(),
            ));
        }
    }

    let notification = Notification::create(
        pool.get_ref(),
        &request.title,
        &request.message,
        request.notification_type,
        &request.display_locations,
        request.is_active.unwrap_or(true),
        request.starts_at,
        request.ends_at,
        request.priority.unwrap_or(0),
    )
    .await?;

    Ok(HttpResponse::Created().json(notification.to_response()))
}

pub async fn update_notification(
    id: web::Path<Uuid>,
    request: web::Json<UpdateNotificationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let mut notification = Notification::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    let request = request.into_inner();
    if let Some(title) = request.title {
        notification.title = title;
    }
    if let Some(message) = request.message {
        notification.message = message;
    }
    if let Some(notification_type) = request.notification_type {
        notification.notification_type = notification_type;
    }
    if let Some(display_locations) = request.display_locations {
        notification.display_locations = display_locations;
    }
    if let Some(is_active) = request.is_active {
        notification.is_active = is_active;
    }
    if let Some(starts_at) = request.starts_at {
        notification.starts_at = starts_at;
    }
    // An explicit null reopens the window.
    if let Some(ends_at) = request.ends_at {
        notification.ends_at = ends_at;
    }
    if let Some(priority) = request.priority {
        notification.priority = priority;
    }

    if let Some(ends_at) = notification.ends_at {
        if ends_at <= notification.starts_at {
            return Err(AppError::Validation(
                "ends_at must be after starts_at".to_string(),
            ));
        }
    }

    let updated = notification.update(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated.to_response()))
}

pub async fn delete_notification(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Notification::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
