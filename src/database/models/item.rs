use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 商品数据库实体
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ItemEntity {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub store_id: i64,
}

/// 商品的可写字段
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ItemFields {
    pub price: f64,
    pub store_id: i64,
}
