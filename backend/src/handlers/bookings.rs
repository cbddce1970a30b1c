use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{
    BookingCreatedResponse, BookingResponse, BookingStatus, CreateBookingRequest,
    PaginatedResponse, UpdateBookingRequest, ERROR_BOOKING_NOT_FOUND,
};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{Booking, Pagination};
use crate::services::booking_service;
use crate::utils::validate_phone_number;

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<BookingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Public booking creation. Totals are computed from the car's daily
/// rate; the response carries the pre-filled WhatsApp enquiry link.
pub async fn create_booking(
    request: web::Json<CreateBookingRequest>,
    pool: web::Data<PgPool>,
    config: web::Data<AppConfig>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    validate_phone_number(&request.customer_phone)?;

    let (booking, whatsapp_link) =
        booking_service::create_booking(pool.get_ref(), &config.whatsapp_number, &request).await?;

    Ok(HttpResponse::Created().json(BookingCreatedResponse {
        booking: booking.to_response(),
        whatsapp_link,
    }))
}

pub async fn list_bookings(
    query: web::Query<BookingListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let page = Pagination::new(query.limit, query.offset);

    let bookings = Booking::find_all(pool.get_ref(), query.status, page.limit, page.offset).await?;
    let total = Booking::count(pool.get_ref(), query.status).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::<BookingResponse> {
        items: bookings.iter().map(Booking::to_response).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn get_booking(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let booking = Booking::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_BOOKING_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(booking.to_response()))
}

/// Status / payment-status update; illegal transitions come back 400.
pub async fn update_booking(
    id: web::Path<Uuid>,
    request: web::Json<UpdateBookingRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let booking =
        booking_service::update_booking(pool.get_ref(), *id, request.status, request.payment_status)
            .await?;

    info!(booking_id = %booking.id, status = %booking.status, "booking updated");

    Ok(HttpResponse::Ok().json(booking.to_response()))
}

pub async fn delete_booking(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Booking::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound(ERROR_BOOKING_NOT_FOUND.to_string()));
    }

    Ok(HttpResponse::NoContent().finish())
}
