use serde::Serialize;
use sqlx::FromRow;

use super::item::ItemEntity;

/// 商店数据库实体
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StoreEntity {
    pub id: i64,
    pub name: String,
}

/// 商店及其商品，对外输出格式
#[derive(Debug, Clone, Serialize)]
pub struct StoreView {
    pub id: i64,
    pub name: String,
    pub items: Vec<ItemEntity>,
}

impl StoreView {
    pub fn new(store: StoreEntity, items: Vec<ItemEntity>) -> Self {
        Self {
            id: store.id,
            name: store.name,
            items,
        }
    }
}
