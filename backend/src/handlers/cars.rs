use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{
    CarResponse, CreateCarRequest, PaginatedResponse, UpdateCarRequest, ERROR_CAR_NOT_FOUND,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Car, Pagination};
use crate::utils::slugify;

#[derive(Debug, Deserialize)]
pub struct CarListQuery {
    pub available: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn require_positive_price(price: Decimal) -> Result<(), AppError> {
    if price <= Decimal::ZERO {
        return Err(AppError::Validation(
            "price_per_day must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Public listing; `?available=true` narrows to bookable cars.
pub async fn list_cars(
    query: web::Query<CarListQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let available_only = query.available.unwrap_or(false);
    let page = Pagination::new(query.limit, query.offset);

    let cars = Car::find_all(pool.get_ref(), available_only, page.limit, page.offset).await?;
    let total = Car::count(pool.get_ref(), available_only).await?;

    Ok(HttpResponse::Ok().json(PaginatedResponse::<CarResponse> {
        items: cars.iter().map(Car::to_response).collect(),
        total,
        limit: page.limit,
        offset: page.offset,
    }))
}

pub async fn get_car_by_slug(
    slug: web::Path<String>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let car = Car::find_by_slug(pool.get_ref(), &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_CAR_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(car.to_response()))
}

pub async fn get_car(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let car = Car::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_CAR_NOT_FOUND.to_string()))?;

    Ok(HttpResponse::Ok().json(car.to_response()))
}

pub async fn create_car(
    request: web::Json<CreateCarRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    require_positive_price(request.price_per_day)?;

    let slug = slugify(&request.name);

    // Blank SEO fields fall back to values derived from the listing.
    let seo_title = request
        .seo_title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("Rent {} | {}", request.name, request.brand));
    let seo_description = request
        .seo_description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| {
            format!(
                "Rent the {} {} from {} per day.",
                request.year, request.name, request.price_per_day
            )
        });

    let car = Car::create(
        pool.get_ref(),
        &request.name,
        &slug,
        &request.brand,
        &request.model,
        request.year,
        request.car_type,
        request.seats,
        request.transmission,
        request.fuel_type,
        request.price_per_day,
        request.price_per_week,
        request.price_per_month,
        &request.features,
        &request.images,
        request.is_available.unwrap_or(true),
        Some(seo_title),
        Some(seo_description),
    )
    .await?;

    info!(car_id = %car.id, slug = %car.slug, "car created");

    Ok(HttpResponse::Created().json(car.to_response()))
}

/// Partial update. A name change regenerates the slug from the new
/// name; an existing slug surfaces as a 409 from the unique index.
pub async fn update_car(
    id: web::Path<Uuid>,
    request: web::Json<UpdateCarRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;
    if let Some(price) = request.price_per_day {
        require_positive_price(price)?;
    }

    let mut car = Car::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound(ERROR_CAR_NOT_FOUND.to_string()))?;

    let request = request.into_inner();
    if let Some(name) = request.name {
        car.slug = slugify(&name);
        car.name = name;
    }
    if let Some(brand) = request.brand {
        car.brand = brand;
    }
    if let Some(model) = request.model {
        car.model = model;
    }
    if let Some(year) = request.year {
        car.year = year;
    }
    if let Some(car_type) = request.car_type {
        car.car_type = car_type;
    }
    if let Some(seats) = request.seats {
        car.seats = seats;
    }
    if let Some(transmission) = request.transmission {
        car.transmission = transmission;
    }
    if let Some(fuel_type) = request.fuel_type {
        car.fuel_type = fuel_type;
    }
    if let Some(price_per_day) = request.price_per_day {
        car.price_per_day = price_per_day;
    }
    if let Some(price_per_week) = request.price_per_week {
        car.price_per_week = price_per_week;
    }
    if let Some(price_per_month) = request.price_per_month {
        car.price_per_month = price_per_month;
    }
    if let Some(features) = request.features {
        car.features = features;
    }
    if let Some(images) = request.images {
        car.images = images;
    }
    if let Some(is_available) = request.is_available {
        car.is_available = is_available;
    }
    if let Some(seo_title) = request.seo_title {
        car.seo_title = seo_title;
    }
    if let Some(seo_description) = request.seo_description {
        car.seo_description = seo_description;
    }

    let updated = car.update(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated.to_response()))
}

pub async fn delete_car(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Car::delete(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound(ERROR_CAR_NOT_FOUND.to_string()));
    }

    info!(car_id = %id, "car deleted");

    Ok(HttpResponse::NoContent().finish())
}
