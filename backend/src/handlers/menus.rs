use actix_web::{web, HttpResponse, Result};
use rental_platform_shared::{CreateMenuRequest, MenuLocation, UpdateMenuRequest};
use serde::Deserialize;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::Menu;
use crate::services::menu_service;

#[derive(Debug, Deserialize)]
pub struct MenuTreeQuery {
    pub location: Option<MenuLocation>,
}

/// Public navigation tree for a placement. Defaults to the header.
pub async fn get_menu_tree(
    query: web::Query<MenuTreeQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let location = query.location.unwrap_or(MenuLocation::Header);
    let tree = menu_service::get_tree(pool.get_ref(), location).await?;

    Ok(HttpResponse::Ok().json(tree))
}

/// Flat admin listing, including inactive entries.
pub async fn list_menus(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let menus = Menu::find_all(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(menus))
}

pub async fn get_menu(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let menu = Menu::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu entry not found".to_string()))?;

    Ok(HttpResponse::Ok().json(menu))
}

pub async fn create_menu(
    request: web::Json<CreateMenuRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let menu = Menu::create(
        pool.get_ref(),
        &request.label,
        &request.href,
        request.position.unwrap_or(0),
        request.is_active.unwrap_or(true),
        request.location,
        request.open_in_new_tab.unwrap_or(false),
        request.parent_id,
    )
    .await?;

    info!(menu_id = %menu.id, label = %menu.label, "menu entry created");

    Ok(HttpResponse::Created().json(menu))
}

pub async fn update_menu(
    id: web::Path<Uuid>,
    request: web::Json<UpdateMenuRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let mut menu = Menu::find_by_id(pool.get_ref(), *id)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu entry not found".to_string()))?;

    let request = request.into_inner();
    if let Some(label) = request.label {
        menu.label = label;
    }
    if let Some(href) = request.href {
        menu.href = href;
    }
    if let Some(position) = request.position {
        menu.position = position;
    }
    if let Some(is_active) = request.is_active {
        menu.is_active = is_active;
    }
    if let Some(location) = request.location {
        menu.location = location;
    }
    if let Some(open_in_new_tab) = request.open_in_new_tab {
        menu.open_in_new_tab = open_in_new_tab;
    }
    // An explicit null detaches the entry back to the root level.
    if let Some(parent_id) = request.parent_id {
        menu.parent_id = parent_id;
    }

    let updated = menu.update(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Delete an entry and its direct children.
pub async fn delete_menu(
    id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    if !Menu::delete_with_children(pool.get_ref(), *id).await? {
        return Err(AppError::NotFound("Menu entry not found".to_string()));
    }

    info!(menu_id = %id, "menu entry deleted");

    Ok(HttpResponse::NoContent().finish())
}
