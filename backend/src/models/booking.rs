use chrono::{DateTime, NaiveDate, Utc};
use rental_platform_shared::{BookingResponse, BookingStatus, PaymentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub pickup_location: String,
    pub pickup_time: Option<String>,
    pub total_days: i32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, car_id, customer_name, customer_email, customer_phone, pickup_date, \
     return_date, pickup_location, pickup_time, total_days, total_price, status, \
     payment_status, created_at, updated_at";

impl Booking {
    /// Insert a booking. Status and payment status always start at
    /// `pending`/`unpaid`; totals are computed by the booking service
    /// before any write happens.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        car_id: Uuid,
        customer_name: &str,
        customer_email: &str,
        customer_phone: &str,
        pickup_date: NaiveDate,
        return_date: NaiveDate,
        pickup_location: &str,
        pickup_time: Option<&str>,
        total_days: i32,
        total_price: Decimal,
    ) -> Result<Self, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (car_id, customer_name, customer_email, customer_phone,
                pickup_date, return_date, pickup_location, pickup_time, total_days, total_price)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(car_id)
        .bind(customer_name)
        .bind(customer_email)
        .bind(customer_phone)
        .bind(pickup_date)
        .bind(return_date)
        .bind(pickup_location)
        .bind(pickup_time)
        .bind(total_days)
        .bind(total_price)
        .fetch_one(pool)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let booking =
            sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE id = $1"))
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(booking)
    }

    pub async fn find_all(
        pool: &PgPool,
        status: Option<BookingStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let bookings = match status {
            Some(status) => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {COLUMNS} FROM bookings WHERE status = $1 \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3"
                ))
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {COLUMNS} FROM bookings ORDER BY created_at DESC LIMIT $1 OFFSET $2"
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(bookings)
    }

    pub async fn count(pool: &PgPool, status: Option<BookingStatus>) -> Result<i64, AppError> {
        let count: i64 = match status {
            Some(status) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = $1")
                    .bind(status)
                    .fetch_one(pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
                    .fetch_one(pool)
                    .await?
            }
        };

        Ok(count)
    }

    /// Single-document status update; transition legality is checked by
    /// the booking service before this runs.
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: BookingStatus,
        payment_status: PaymentStatus,
    ) -> Result<Self, AppError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "UPDATE bookings SET status = $2, payment_status = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .bind(payment_status)
        .fetch_one(pool)
        .await?;

        Ok(booking)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> BookingResponse {
        BookingResponse {
            id: self.id,
            car_id: self.car_id,
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            customer_phone: self.customer_phone.clone(),
            pickup_date: self.pickup_date,
            return_date: self.return_date,
            pickup_location: self.pickup_location.clone(),
            pickup_time: self.pickup_time.clone(),
            total_days: self.total_days,
            total_price: self.total_price,
            status: self.status,
            payment_status: self.payment_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
