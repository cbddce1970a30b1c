//! Navigation tree assembly.
//!
//! Menu rows are stored flat with a soft `parent_id` reference. The
//! builder turns one query's worth of rows into a forest in two passes
//! over an arena: first index every id, then attach each node to its
//! parent or, when the parent is not part of the same result set, to
//! the root level. Every input row appears in the output exactly once.

use rental_platform_shared::{MenuLocation, MenuTreeNode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Menu;

/// Fetch the active entries for a placement and assemble them into a
/// tree. Root and child ordering both come from the query's
/// `ORDER BY position`.
pub async fn get_tree(pool: &PgPool, location: MenuLocation) -> Result<Vec<MenuTreeNode>, AppError> {
    let menus = Menu::find_active_by_location(pool, location).await?;
    Ok(build_tree(menus))
}

/// Two-pass arena build.
///
/// Pass one indexes every row id to its arena slot. Pass two resolves
/// each `parent_id` against that index: a hit records a child edge, a
/// miss (no parent, or a parent filtered out / deleted) makes the row
/// a root. Children keep the input order, which is already sorted by
/// position.
pub fn build_tree(menus: Vec<Menu>) -> Vec<MenuTreeNode> {
    let index: std::collections::HashMap<Uuid, usize> = menus
        .iter()
        .enumerate()
        .map(|(slot, menu)| (menu.id, slot))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); menus.len()];
    let mut roots: Vec<usize> = Vec::new();

    for (slot, menu) in menus.iter().enumerate() {
        match menu.parent_id.and_then(|parent| index.get(&parent)) {
            // Self-parented rows fall through to root rather than cycling.
            Some(&parent_slot) if parent_slot != slot => children[parent_slot].push(slot),
            _ => roots.push(slot),
        }
    }

    roots
        .into_iter()
        .map(|slot| to_node(slot, &menus, &children))
        .collect()
}

fn to_node(slot: usize, menus: &[Menu], children: &[Vec<usize>]) -> MenuTreeNode {
    let menu = &menus[slot];
    MenuTreeNode {
        id: menu.id,
        label: menu.label.clone(),
        href: menu.href.clone(),
        position: menu.position,
        location: menu.location,
        open_in_new_tab: menu.open_in_new_tab,
        children: children[slot]
            .iter()
            .map(|&child| to_node(child, menus, children))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn menu(label: &str, position: i32, parent_id: Option<Uuid>) -> Menu {
        let now = Utc::now();
        Menu {
            id: Uuid::new_v4(),
            label: label.to_string(),
            href: format!("/{label}"),
            position,
            is_active: true,
            location: MenuLocation::Header,
            open_in_new_tab: false,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn count_nodes(nodes: &[MenuTreeNode]) -> usize {
        nodes
            .iter()
            .map(|n| 1 + count_nodes(&n.children))
            .sum()
    }

    #[test]
    fn builds_nested_forest() {
        let cars = menu("cars", 1, None);
        let luxury = menu("luxury", 1, Some(cars.id));
        let economy = menu("economy", 2, Some(cars.id));
        let about = menu("about", 2, None);

        let tree = build_tree(vec![cars.clone(), luxury.clone(), economy.clone(), about]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].label, "cars");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].label, "luxury");
        assert_eq!(tree[0].children[1].label, "economy");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn every_row_appears_exactly_once() {
        let root = menu("root", 1, None);
        let rows = vec![
            root.clone(),
            menu("a", 2, Some(root.id)),
            menu("b", 3, Some(root.id)),
            menu("orphan", 4, Some(Uuid::new_v4())),
        ];
        let total = rows.len();

        let tree = build_tree(rows);

        assert_eq!(count_nodes(&tree), total);
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let orphan = menu("orphan", 1, Some(Uuid::new_v4()));

        let tree = build_tree(vec![orphan]);

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].label, "orphan");
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn self_parented_row_becomes_root() {
        let mut broken = menu("loop", 1, None);
        broken.parent_id = Some(broken.id);

        let tree = build_tree(vec![broken]);

        assert_eq!(tree.len(), 1);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn sibling_order_follows_input_order() {
        let rows = vec![menu("first", 1, None), menu("second", 2, None), menu("third", 3, None)];

        let tree = build_tree(rows);

        let labels: Vec<&str> = tree.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(build_tree(Vec::new()).is_empty());
    }
}
