use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::RepositoryError;
use crate::database::models::StoreEntity;

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoreEntity>, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<StoreEntity>, RepositoryError>;

    async fn create(&self, name: &str) -> Result<StoreEntity, RepositoryError>;

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError>;
}

/// 商店存储库 PostgreSQL 实现
#[derive(Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoreEntity>, RepositoryError> {
        let store =
            sqlx::query_as::<_, StoreEntity>("SELECT id, name FROM stores WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        Ok(store)
    }

    async fn find_all(&self) -> Result<Vec<StoreEntity>, RepositoryError> {
        let stores = sqlx::query_as::<_, StoreEntity>("SELECT id, name FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(stores)
    }

    async fn create(&self, name: &str) -> Result<StoreEntity, RepositoryError> {
        let store = sqlx::query_as::<_, StoreEntity>(
            "INSERT INTO stores (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        Ok(store)
    }

    async fn delete(&self, name: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM stores WHERE name = $1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
