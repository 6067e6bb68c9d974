//! Menu tree request and response types.

use entity::menus::MenuType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a menu node
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    /// Internal node name
    #[validate(length(min = 1, max = 64, message = "Menu name is required"))]
    pub name: String,

    /// Label shown in navigation
    #[validate(length(min = 1, max = 128, message = "Menu label is required"))]
    pub label: String,

    /// Node type; plinks require a glink parent
    pub menu_type: MenuType,

    /// Parent node; only valid for plinks
    pub parent_id: Option<Uuid>,

    /// Navigation route
    pub route: Option<String>,

    /// Sibling order; defaults to last
    pub sort_order: Option<i32>,
}

/// Request body for updating a menu node. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuRequest {
    #[validate(length(min = 1, max = 64, message = "Menu name must not be empty"))]
    pub name:       Option<String>,
    #[validate(length(min = 1, max = 128, message = "Menu label must not be empty"))]
    pub label:      Option<String>,
    pub route:      Option<String>,
    pub sort_order: Option<i32>,
    pub is_active:  Option<bool>,
}

/// One entry of a bulk reorder request. `Serialize` is required by the
/// length rule on [`ReorderMenusRequest::items`], which embeds the
/// offending value in its validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    /// The node to reorder
    pub id: Uuid,

    /// Its new sibling position
    pub sort_order: i32,
}

/// Request body for bulk sibling reordering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct ReorderMenusRequest {
    #[validate(length(min = 1, message = "At least one entry is required"))]
    pub items: Vec<ReorderEntry>,
}

/// A menu node with its children, ordered by `sort_order`. Also the
/// response shape for menu creation and updates, with no children yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTreeNode {
    pub id:         Uuid,
    pub name:       String,
    pub label:      String,
    pub menu_type:  MenuType,
    pub route:      Option<String>,
    pub sort_order: i32,
    pub is_active:  bool,
    pub children:   Vec<MenuTreeNode>,
}

impl From<&entity::menus::Model> for MenuTreeNode {
    fn from(menu: &entity::menus::Model) -> Self {
        Self {
            id:         menu.id,
            name:       menu.name.clone(),
            label:      menu.label.clone(),
            menu_type:  menu.menu_type.clone(),
            route:      menu.route.clone(),
            sort_order: menu.sort_order,
            is_active:  menu.is_active,
            children:   Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_request_rejects_empty_items() {
        let request = ReorderMenusRequest { items: Vec::new() };
        assert!(request.validate().is_err());

        let request = ReorderMenusRequest {
            items: vec![ReorderEntry {
                id:         Uuid::new_v4(),
                sort_order: 0,
            }],
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_menu_wire_names_are_camel_case() {
        let json = serde_json::to_value(MenuTreeNode {
            id:         Uuid::new_v4(),
            name:       "settings".to_string(),
            label:      "Settings".to_string(),
            menu_type:  MenuType::Glink,
            route:      None,
            sort_order: 0,
            is_active:  true,
            children:   Vec::new(),
        })
        .unwrap();

        assert!(json.get("menuType").is_some());
        assert!(json.get("sortOrder").is_some());
        assert!(json.get("isActive").is_some());
        assert_eq!(json["menuType"], "glink");

        let request: CreateMenuRequest = serde_json::from_value(serde_json::json!({
            "name": "users",
            "label": "Users",
            "menuType": "plink",
            "parentId": Uuid::new_v4(),
        }))
        .unwrap();
        assert_eq!(request.menu_type, MenuType::Plink);
    }
}
