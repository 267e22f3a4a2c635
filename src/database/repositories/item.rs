use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::RepositoryError;
use crate::database::models::{ItemEntity, ItemFields};

#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<ItemEntity>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<ItemEntity>, RepositoryError>;

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<ItemEntity>, RepositoryError>;

    /// 同名商品已存在时返回 Conflict
    async fn create(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError>;

    /// 已存在时只更新价格，否则新建
    async fn upsert(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError>;

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError>;
}

/// 商品存储库 PostgreSQL 实现
#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<ItemEntity>, RepositoryError> {
        let item = sqlx::query_as::<_, ItemEntity>(
            "SELECT id, name, price, store_id FROM items WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn find_all(&self) -> Result<Vec<ItemEntity>, RepositoryError> {
        let items =
            sqlx::query_as::<_, ItemEntity>("SELECT id, name, price, store_id FROM items ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(items)
    }

    async fn find_by_store(&self, store_id: i64) -> Result<Vec<ItemEntity>, RepositoryError> {
        let items = sqlx::query_as::<_, ItemEntity>(
            "SELECT id, name, price, store_id FROM items WHERE store_id = $1 ORDER BY id",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn create(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError> {
        let item = sqlx::query_as::<_, ItemEntity>(
            r#"
            INSERT INTO items (name, price, store_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, store_id
            "#,
        )
        .bind(name)
        .bind(fields.price)
        .bind(fields.store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        Ok(item)
    }

    async fn upsert(&self, name: &str, fields: ItemFields) -> Result<ItemEntity, RepositoryError> {
        let item = sqlx::query_as::<_, ItemEntity>(
            r#"
            INSERT INTO items (name, price, store_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE SET price = EXCLUDED.price
            RETURNING id, name, price, store_id
            "#,
        )
        .bind(name)
        .bind(fields.price)
        .bind(fields.store_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM items WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
