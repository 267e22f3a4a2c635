use serde::Serialize;

use crate::database::ItemEntity;

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<ItemEntity>,
}

pub const ITEM_NOT_FOUND: &str = "Item not found.";
pub const ITEM_DELETED: &str = "Item deleted.";
pub const ERROR_INSERTING: &str = "An error occurred while inserting the item.";
pub const ERROR_UPDATING: &str = "An error occurred while updating the item.";

pub fn name_already_exists(name: &str) -> String {
    format!("An item with name '{}' already exists.", name)
}
