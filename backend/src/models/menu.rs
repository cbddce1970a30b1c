use chrono::{DateTime, Utc};
use rental_platform_shared::MenuLocation;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;

/// Flat navigation entry. Hierarchy is a soft self-reference through
/// `parent_id`; the tree builder treats a dangling parent as "root".
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Menu {
    pub id: Uuid,
    pub label: String,
    pub href: String,
    pub position: i32,
    pub is_active: bool,
    pub location: MenuLocation,
    pub open_in_new_tab: bool,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const COLUMNS: &str = "id, label, href, position, is_active, location, open_in_new_tab, \
     parent_id, created_at, updated_at";

impl Menu {
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        label: &str,
        href: &str,
        position: i32,
        is_active: bool,
        location: MenuLocation,
        open_in_new_tab: bool,
        parent_id: Option<Uuid>,
    ) -> Result<Self, AppError> {
        let menu = sqlx::query_as::<_, Menu>(&format!(
            r#"
            INSERT INTO menus (label, href, position, is_active, location, open_in_new_tab, parent_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(label)
        .bind(href)
        .bind(position)
        .bind(is_active)
        .bind(location)
        .bind(open_in_new_tab)
        .bind(parent_id)
        .fetch_one(pool)
        .await?;

        Ok(menu)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let menu = sqlx::query_as::<_, Menu>(&format!("SELECT {COLUMNS} FROM menus WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(menu)
    }

    /// Active entries for a placement, sorted by position. An entry
    /// stored as `both` shows up in either placement.
    pub async fn find_active_by_location(
        pool: &PgPool,
        location: MenuLocation,
    ) -> Result<Vec<Self>, AppError> {
        let menus = match location {
            MenuLocation::Both => {
                sqlx::query_as::<_, Menu>(&format!(
                    "SELECT {COLUMNS} FROM menus WHERE is_active = true ORDER BY position ASC"
                ))
                .fetch_all(pool)
                .await?
            }
            requested => {
                sqlx::query_as::<_, Menu>(&format!(
                    "SELECT {COLUMNS} FROM menus WHERE is_active = true \
                     AND (location = $1 OR location = 'both') ORDER BY position ASC"
                ))
                .bind(requested)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(menus)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>, AppError> {
        let menus = sqlx::query_as::<_, Menu>(&format!(
            "SELECT {COLUMNS} FROM menus ORDER BY position ASC"
        ))
        .fetch_all(pool)
        .await?;

        Ok(menus)
    }

    pub async fn update(&self, pool: &PgPool) -> Result<Self, AppError> {
        let menu = sqlx::query_as::<_, Menu>(&format!(
            r#"
            UPDATE menus SET
                label = $2, href = $3, position = $4, is_active = $5, location = $6,
                open_in_new_tab = $7, parent_id = $8, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(self.id)
        .bind(&self.label)
        .bind(&self.href)
        .bind(self.position)
        .bind(self.is_active)
        .bind(self.location)
        .bind(self.open_in_new_tab)
        .bind(self.parent_id)
        .fetch_one(pool)
        .await?;

        Ok(menu)
    }

    /// Delete the entry and its direct children in a single statement.
    /// The cascade is single-level: grandchildren keep their dangling
    /// `parent_id` and the tree builder demotes them to roots on read.
    pub async fn delete_with_children(pool: &PgPool, id: Uuid) -> Result<bool, AppError> {
        let rows: Vec<(Uuid, Option<Uuid>)> = sqlx::query_as("SELECT id, parent_id FROM menus")
            .fetch_all(pool)
            .await?;

        let scope = cascade_scope(id, &rows);
        if scope.is_empty() {
            return Ok(false);
        }

        sqlx::query("DELETE FROM menus WHERE id = ANY($1)")
            .bind(&scope)
            .execute(pool)
            .await?;

        Ok(true)
    }
}

/// Rows covered by a delete: the target plus its direct children. An
/// absent target deletes nothing, even if stale rows still point at it.
fn cascade_scope(target: Uuid, rows: &[(Uuid, Option<Uuid>)]) -> Vec<Uuid> {
    if !rows.iter().any(|(id, _)| *id == target) {
        return Vec::new();
    }

    let mut scope = vec![target];
    scope.extend(
        rows.iter()
            .filter(|(_, parent)| *parent == Some(target))
            .map(|(id, _)| *id),
    );
    scope
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cascade_stops_at_direct_children() {
        let parent = Uuid::new_v4();
        let child = Uuid::new_v4();
        let grandchild = Uuid::new_v4();
        let rows = vec![
            (parent, None),
            (child, Some(parent)),
            (grandchild, Some(child)),
        ];

        let scope = cascade_scope(parent, &rows);

        assert!(scope.contains(&parent));
        assert!(scope.contains(&child));
        assert!(!scope.contains(&grandchild));
    }

    #[test]
    fn missing_entry_deletes_nothing() {
        let gone = Uuid::new_v4();
        let stale_child = Uuid::new_v4();
        let rows = vec![(stale_child, Some(gone))];

        assert!(cascade_scope(gone, &rows).is_empty());
    }

    #[test]
    fn childless_entry_is_just_itself() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let rows = vec![(id, None), (other, None)];

        assert_eq!(cascade_scope(id, &rows), vec![id]);
    }
}
