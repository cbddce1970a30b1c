use chrono::{DateTime, Utc};
use rental_platform_shared::{CarResponse, CarType, FuelType, Transmission};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub car_type: CarType,
    pub seats: i32,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub price_per_day: Decimal,
    pub price_per_week: Option<Decimal>,
    pub price_per_month: Option<Decimal>,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, name, slug, brand, model, year, car_type, seats, transmission, \
     fuel_type, price_per_day, price_per_week, price_per_month, features, images, \
     is_available, seo_title, seo_description, created_at, updated_at";

impl Car {
    /// Insert a new car. The slug is derived by the caller; the unique
    /// index on `slug` is the final arbiter of duplicates.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        brand: &str,
        model: &str,
        year: i32,
        car_type: CarType,
        seats: i32,
        transmission: Transmission,
        fuel_type: FuelType,
        price_per_day: Decimal,
        price_per_week: Option<Decimal>,
        price_per_month: Option<Decimal>,
        features: &[String],
        images: &[String],
        is_available: bool,
        seo_title: Option<String>,
        seo_description: Option<String>,
    ) -> Result<Self, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            r#"
            INSERT INTO cars (name, slug, brand, model, year, car_type, seats, transmission,
                fuel_type, price_per_day, price_per_week, price_per_month, features, images,
                is_available, seo_title, seo_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(name)
        .bind(slug)
        .bind(brand)
        .bind(model)
        .bind(year)
        .bind(car_type)
        .bind(seats)
        .bind(transmission)
        .bind(fuel_type)
        .bind(price_per_day)
        .bind(price_per_week)
        .bind(price_per_month)
        .bind(features)
        .bind(images)
        .bind(is_available)
        .bind(seo_title)
        .bind(seo_description)
        .fetch_one(pool)
        .await?;

        Ok(car)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {COLUMNS} FROM cars WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(car)
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Self>, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!("SELECT {COLUMNS} FROM cars WHERE slug = $1"))
            .bind(slug)
            .fetch_optional(pool)
            .await?;

        Ok(car)
    }

    /// List cars, optionally restricted to available ones.
    pub async fn find_all(
        pool: &PgPool,
        available_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let cars = if available_only {
            sqlx::query_as::<_, Car>(&format!(
                "SELECT {COLUMNS} FROM cars WHERE is_available = true \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, Car>(&format!(
                "SELECT {COLUMNS} FROM cars ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        };

        Ok(cars)
    }

    pub async fn count(pool: &PgPool, available_only: bool) -> Result<i64, AppError> {
        let count: i64 = if available_only {
            sqlx::query_scalar("SELECT COUNT(*) FROM cars WHERE is_available = true")
                .fetch_one(pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM cars")
                .fetch_one(pool)
                .await?
        };

        Ok(count)
    }

    /// Write back a fully merged car. The caller regenerates the slug
    /// whenever the name changed (no collision handling for cars).
    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let car = sqlx::query_as::<_, Car>(&format!(
            r#"
            UPDATE cars SET
                name = $2, slug = $3, brand = $4, model = $5, year = $6, car_type = $7,
                seats = $8, transmission = $9, fuel_type = $10, price_per_day = $11,
                price_per_week = $12, price_per_month = $13, features = $14, images = $15,
                is_available = $16, seo_title = $17, seo_description = $18, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.slug)
        .bind(&self.brand)
        .bind(&self.model)
        .bind(self.year)
        .bind(self.car_type)
        .bind(self.seats)
        .bind(self.transmission)
        .bind(self.fuel_type)
        .bind(self.price_per_day)
        .bind(self.price_per_week)
        .bind(self.price_per_month)
        .bind(&self.features)
        .bind(&self.images)
        .bind(self.is_available)
        .bind(&self.seo_title)
        .bind(&self.seo_description)
        .fetch_one(pool)
        .await?;

        Ok(car)
    }

    /// Hard delete; cars have no soft-delete or cascade semantics.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> CarResponse {
        CarResponse {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            car_type: self.car_type,
            seats: self.seats,
            transmission: self.transmission,
            fuel_type: self.fuel_type,
            price_per_day: self.price_per_day,
            price_per_week: self.price_per_week,
            price_per_month: self.price_per_month,
            features: self.features.clone(),
            images: self.images.clone(),
            is_available: self.is_available,
            seo_title: self.seo_title.clone(),
            seo_description: self.seo_description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
