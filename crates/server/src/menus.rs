//! # Menu Tree Handlers
//!
//! Two-level navigation tree of glink (group) and plink (page) nodes.
//! The parent-type invariant is enforced at creation: a glink never has a
//! parent, a plink always has a glink parent. Node type and parent are
//! immutable after creation so the invariant cannot be broken by updates.

use axum::Json;
use chrono::Utc;
use entity::menus::{Column, Entity as MenusEntity, MenuType};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::menus::{CreateMenuRequest, MenuTreeNode, ReorderMenusRequest, UpdateMenuRequest};
use crate::dto::{DataResponse, SuccessResponse};
use crate::AppState;

/// Builds the menu tree: glink roots ordered by `sort_order`, each with
/// its plink children in sibling order.
pub async fn list_menus_inner(state: &AppState) -> Result<Json<DataResponse<Vec<MenuTreeNode>>>> {
    let rows = MenusEntity::find()
        .order_by_asc(Column::SortOrder)
        .all(&state.db)
        .await?;

    Ok(Json(DataResponse::ok(build_tree(&rows))))
}

/// Assembles sorted rows into the two-level tree. Plinks whose parent is
/// missing from the row set are dropped.
fn build_tree(rows: &[entity::menus::Model]) -> Vec<MenuTreeNode> {
    let mut roots: Vec<MenuTreeNode> = rows
        .iter()
        .filter(|m| m.menu_type == MenuType::Glink)
        .map(MenuTreeNode::from)
        .collect();

    for row in rows.iter().filter(|m| m.menu_type == MenuType::Plink) {
        let Some(parent_id) = row.parent_id else {
            continue;
        };
        if let Some(parent) = roots.iter_mut().find(|r| r.id == parent_id) {
            parent.children.push(MenuTreeNode::from(row));
        }
    }

    roots
}

/// Creates a menu node, enforcing the glink/plink parent invariant.
pub async fn create_menu_inner(
    state: &AppState,
    req: CreateMenuRequest,
) -> Result<Json<DataResponse<MenuTreeNode>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let parent_id = match req.menu_type {
        MenuType::Glink => {
            if req.parent_id.is_some() {
                return Err(AppError::validation("A glink menu cannot have a parent"));
            }
            None
        },
        MenuType::Plink => {
            let parent_id = req
                .parent_id
                .ok_or_else(|| AppError::validation("A plink menu requires a glink parent"))?;
            let parent = MenusEntity::find_by_id(parent_id)
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::validation("Parent menu does not exist"))?;
            if parent.menu_type != MenuType::Glink {
                return Err(AppError::validation("A plink's parent must be a glink"));
            }
            Some(parent_id)
        },
    };

    let sort_order = match req.sort_order {
        Some(order) => order,
        None => next_sort_order(state, parent_id).await?,
    };

    let now = Utc::now();
    let menu = entity::menus::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(req.name),
        label: Set(req.label),
        menu_type: Set(req.menu_type),
        parent_id: Set(parent_id),
        route: Set(req.route),
        sort_order: Set(sort_order),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let menu = menu.insert(&state.db).await?;

    Ok(Json(DataResponse::ok(MenuTreeNode::from(&menu))))
}

/// Next free sibling position under a parent (or at the root).
async fn next_sort_order(state: &AppState, parent_id: Option<Uuid>) -> Result<i32> {
    let query = match parent_id {
        Some(parent_id) => MenusEntity::find().filter(Column::ParentId.eq(parent_id)),
        None => MenusEntity::find().filter(Column::ParentId.is_null()),
    };

    let last = query.order_by_desc(Column::SortOrder).one(&state.db).await?;
    Ok(last.map_or(0, |m| m.sort_order + 1))
}

/// Updates a menu node's name, label, route, order or active flag. Type
/// and parent stay fixed.
pub async fn update_menu_inner(
    state: &AppState,
    id: Uuid,
    req: UpdateMenuRequest,
) -> Result<Json<DataResponse<MenuTreeNode>>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    let menu = MenusEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Menu not found"))?;

    let mut active: entity::menus::ActiveModel = menu.into();
    if let Some(v) = req.name {
        active.name = Set(v);
    }
    if let Some(v) = req.label {
        active.label = Set(v);
    }
    if let Some(v) = req.route {
        active.route = Set(Some(v));
    }
    if let Some(v) = req.sort_order {
        active.sort_order = Set(v);
    }
    if let Some(v) = req.is_active {
        active.is_active = Set(v);
    }
    active.updated_at = Set(Utc::now());
    let menu = active.update(&state.db).await?;

    Ok(Json(DataResponse::ok(MenuTreeNode::from(&menu))))
}

/// Deletes a menu node. Deleting a glink cascades to its plinks.
pub async fn delete_menu_inner(state: &AppState, id: Uuid) -> Result<Json<SuccessResponse>> {
    let menu = MenusEntity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Menu not found"))?;

    MenusEntity::delete_by_id(menu.id).exec(&state.db).await?;

    Ok(Json(SuccessResponse::new("Menu deleted")))
}

/// Applies a bulk sibling reorder in one transaction; either every entry
/// applies or none does.
pub async fn reorder_menus_inner(state: &AppState, req: ReorderMenusRequest) -> Result<Json<SuccessResponse>> {
    req.validate().map_err(|e| AppError::validation(e))?;

    state
        .db
        .transaction::<_, (), AppError>(move |txn| {
            Box::pin(async move {
                for entry in req.items {
                    let menu = MenusEntity::find_by_id(entry.id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| AppError::not_found("Menu not found"))?;

                    let mut active: entity::menus::ActiveModel = menu.into();
                    active.sort_order = Set(entry.sort_order);
                    active.updated_at = Set(Utc::now());
                    active.update(txn).await?;
                }
                Ok(())
            })
        })
        .await
        .map_err(|e| {
            match e {
                TransactionError::Connection(err) => AppError::from(err),
                TransactionError::Transaction(err) => err,
            }
        })?;

    Ok(Json(SuccessResponse::new("Menu order updated")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu(name: &str, menu_type: MenuType, parent_id: Option<Uuid>, sort_order: i32) -> entity::menus::Model {
        entity::menus::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            label: name.to_uppercase(),
            menu_type,
            parent_id,
            route: None,
            sort_order,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_tree_nests_plinks_under_their_glink() {
        let dashboard = menu("dashboard", MenuType::Glink, None, 0);
        let settings = menu("settings", MenuType::Glink, None, 1);
        let users = menu("users", MenuType::Plink, Some(settings.id), 0);

        let tree = build_tree(&[dashboard.clone(), settings.clone(), users.clone()]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "dashboard");
        assert!(tree[0].children.is_empty());
        assert_eq!(tree[1].children.len(), 1);
        assert_eq!(tree[1].children[0].name, "users");
    }

    #[test]
    fn test_build_tree_drops_orphan_plinks() {
        let orphan = menu("orphan", MenuType::Plink, Some(Uuid::new_v4()), 0);
        let tree = build_tree(&[orphan]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_build_tree_preserves_input_order() {
        let a = menu("a", MenuType::Glink, None, 0);
        let b = menu("b", MenuType::Glink, None, 1);
        let a1 = menu("a1", MenuType::Plink, Some(a.id), 0);
        let a2 = menu("a2", MenuType::Plink, Some(a.id), 1);

        // Rows arrive ordered by sort_order; the tree keeps that order.
        let tree = build_tree(&[a, b, a1, a2]);

        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].name, "a1");
        assert_eq!(tree[0].children[1].name, "a2");
    }
}
