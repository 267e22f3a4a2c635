use serde::Serialize;
use sqlx::FromRow;

/// 用户数据库实体
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserEntity {
    pub id: i64,
    pub username: String,
    /// bcrypt 哈希，不对外输出
    #[serde(skip_serializing)]
    pub password: String,
}
