// 数据库模块
// 实体定义、存储库接口及其 PostgreSQL / 内存实现

pub mod memory;
pub mod models;
pub mod repositories;

use sqlx::PgPool;

pub use memory::MemoryDatabase;
pub use models::{ItemEntity, ItemFields, StoreEntity, StoreView, UserEntity};
pub use repositories::{
    ItemRepository, PgItemRepository, PgStoreRepository, PgUserRepository, StoreRepository,
    UserRepository,
};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// 唯一约束冲突转为 Conflict
    pub(crate) fn from_insert(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Conflict,
            _ => RepositoryError::Database(e),
        }
    }
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username VARCHAR(80) NOT NULL UNIQUE,
        password VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS stores (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(80) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(80) NOT NULL UNIQUE,
        price DOUBLE PRECISION NOT NULL,
        store_id BIGINT NOT NULL
    )
    "#,
];

/// 表不存在时创建
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
