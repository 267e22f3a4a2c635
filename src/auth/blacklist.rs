use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum BlacklistError {
    #[error("blacklist backend unavailable: {0}")]
    Backend(#[from] redis::RedisError),
}

/// 已吊销令牌（jti）集合，add 完成后对之后的 contains 立即可见
#[async_trait]
pub trait TokenBlacklist: Send + Sync {
    /// expires_at 为令牌自身过期时间，支持 TTL 的后端据此清理
    async fn add(&self, jti: &str, expires_at: i64) -> Result<(), BlacklistError>;

    async fn contains(&self, jti: &str) -> Result<bool, BlacklistError>;
}

/// 进程内黑名单
///
/// 条目从不清理，会随登出次数持续增长，需要时改用 Redis 黑名单。
#[derive(Debug, Default)]
pub struct MemoryBlacklist {
    revoked: RwLock<HashSet<String>>,
}

impl MemoryBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }
}

#[async_trait]
impl TokenBlacklist for MemoryBlacklist {
    async fn add(&self, jti: &str, _expires_at: i64) -> Result<(), BlacklistError> {
        self.revoked.write().await.insert(jti.to_string());
        Ok(())
    }

    async fn contains(&self, jti: &str) -> Result<bool, BlacklistError> {
        Ok(self.revoked.read().await.contains(jti))
    }
}
