use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::RepositoryError;
use crate::database::models::UserEntity;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// password 须已哈希，用户名重复时返回 Conflict
    async fn create(&self, username: &str, password: &str) -> Result<UserEntity, RepositoryError>;

    async fn find_by_username(&self, username: &str)
    -> Result<Option<UserEntity>, RepositoryError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, RepositoryError>;

    /// 返回是否确实删除了记录
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// 用户存储库 PostgreSQL 实现
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, username: &str, password: &str) -> Result<UserEntity, RepositoryError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_insert)?;

        tracing::info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, RepositoryError> {
        let user = sqlx::query_as::<_, UserEntity>(
            "SELECT id, username, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UserEntity>, RepositoryError> {
        let user =
            sqlx::query_as::<_, UserEntity>("SELECT id, username, password FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
