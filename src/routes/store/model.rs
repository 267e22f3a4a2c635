use serde::Serialize;

use crate::database::StoreView;

#[derive(Debug, Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreView>,
}

pub const STORE_NOT_FOUND: &str = "Store not found.";
pub const STORE_DELETED: &str = "Store deleted.";
pub const ERROR_CREATING: &str = "An error occurred while creating the store.";

pub fn name_already_exists(name: &str) -> String {
    format!("A store with name '{}' already exists.", name)
}
