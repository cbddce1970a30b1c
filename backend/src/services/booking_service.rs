//! Booking creation and lifecycle.
//!
//! Price and duration are computed server-side from the car's daily
//! rate, never taken from the client. Status changes go through the
//! `BookingStatus::can_transition_to` state machine.

use chrono::NaiveDate;
use rental_platform_shared::{
    BookingStatus, CreateBookingRequest, PaymentStatus, ERROR_BOOKING_NOT_FOUND,
    ERROR_CAR_NOT_FOUND, ERROR_INVALID_DATE_RANGE,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Booking, Car};
use crate::utils::whatsapp;

/// Computed rental terms for a date range against a daily rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalQuote {
    pub total_days: i32,
    pub total_price: Decimal,
}

/// Whole-day pricing: days are the calendar difference between return
/// and pickup, and must be at least one.
pub fn quote(
    pickup_date: NaiveDate,
    return_date: NaiveDate,
    price_per_day: Decimal,
) -> Result<RentalQuote, AppError> {
    let total_days = (return_date - pickup_date).num_days();
    if total_days <= 0 {
        return Err(AppError::Validation(ERROR_INVALID_DATE_RANGE.to_string()));
    }

    let total_days = i32::try_from(total_days)
        .map_err(|_| AppError::Validation(ERROR_INVALID_DATE_RANGE.to_string()))?;

    Ok(RentalQuote {
        total_days,
        total_price: Decimal::from(total_days) * price_per_day,
    })
}

/// Create a booking against an existing car and return it together
/// with the pre-filled WhatsApp enquiry link.
pub async fn create_booking(
    pool: &PgPool,
    whatsapp_number: &str,
    request: &CreateBookingRequest,
) -> Result<(Booking, String), AppError> {
    let car = Car::find_by_id(pool, request.car_id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_CAR_NOT_FOUND.to_string()))?;

    let quote = quote(request.pickup_date, request.return_date, car.price_per_day)?;

    let booking = Booking::create(
        pool,
        car.id,
        &request.customer_name,
        &request.customer_email,
        &request.customer_phone,
        request.pickup_date,
        request.return_date,
        &request.pickup_location,
        request.pickup_time.as_deref(),
        quote.total_days,
        quote.total_price,
    )
    .await?;

    let link = whatsapp::booking_link(
        whatsapp_number,
        &car.name,
        &booking.customer_name,
        booking.pickup_date,
        booking.return_date,
        booking.total_price,
    );

    tracing::info!(
        booking_id = %booking.id,
        car_id = %car.id,
        total_days = booking.total_days,
        "booking created"
    );

    Ok((booking, link))
}

/// Apply a status and/or payment status change. Illegal status
/// transitions are rejected; payment status moves freely.
pub async fn update_booking(
    pool: &PgPool,
    id: Uuid,
    status: Option<BookingStatus>,
    payment_status: Option<PaymentStatus>,
) -> Result<Booking, AppError> {
    let booking = Booking::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_BOOKING_NOT_FOUND.to_string()))?;

    let next_status = match status {
        Some(next) if next != booking.status => {
            if !booking.status.can_transition_to(next) {
                return Err(AppError::Validation(format!(
                    "Cannot change booking status from {} to {}",
                    booking.status, next
                )));
            }
            next
        }
        _ => booking.status,
    };

    let next_payment = payment_status.unwrap_or(booking.payment_status);

    Booking::update_status(pool, id, next_status, next_payment).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn three_nights_at_daily_rate() {
        let q = quote(date(2024, 1, 1), date(2024, 1, 4), Decimal::from(1000)).unwrap();
        assert_eq!(q.total_days, 3);
        assert_eq!(q.total_price, Decimal::from(3000));
    }

    #[test]
    fn single_day_rental() {
        let q = quote(date(2024, 6, 10), date(2024, 6, 11), Decimal::from(250)).unwrap();
        assert_eq!(q.total_days, 1);
        assert_eq!(q.total_price, Decimal::from(250));
    }

    #[test]
    fn fractional_daily_rate() {
        let q = quote(
            date(2024, 3, 1),
            date(2024, 3, 3),
            Decimal::new(19950, 2), // 199.50
        )
        .unwrap();
        assert_eq!(q.total_days, 2);
        assert_eq!(q.total_price, Decimal::new(39900, 2));
    }

    #[test]
    fn same_day_is_rejected() {
        let err = quote(date(2024, 1, 1), date(2024, 1, 1), Decimal::from(100)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn return_before_pickup_is_rejected() {
        let err = quote(date(2024, 1, 5), date(2024, 1, 1), Decimal::from(100)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn spans_month_boundary() {
        let q = quote(date(2024, 1, 30), date(2024, 2, 2), Decimal::from(100)).unwrap();
        assert_eq!(q.total_days, 3);
    }
}
