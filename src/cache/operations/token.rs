use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient, RedisError};

use crate::auth::{BlacklistError, TokenBlacklist};
use crate::cache::keys::revoked_token_key;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_millis(50);

/// Redis 令牌黑名单
///
/// 每个 jti 一个键，过期时间与令牌本身一致，令牌失效后键自动清除。
#[derive(Clone)]
pub struct RedisBlacklist {
    redis: Arc<RedisClient>,
}

impl RedisBlacklist {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    async fn with_retry<T, F, Fut>(&self, op: &str, mut f: F) -> Result<T, RedisError>
    where
        F: FnMut(Arc<RedisClient>) -> Fut,
        Fut: Future<Output = Result<T, RedisError>>,
    {
        let mut attempt = 1;
        loop {
            match f(self.redis.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                    tracing::warn!("Redis {} failed (attempt {}): {}", op, attempt, e);
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn is_transient(e: &RedisError) -> bool {
    e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal()
}

/// 令牌剩余有效秒数，已过期返回 None
fn remaining_ttl(expires_at: i64, now: i64) -> Option<u64> {
    let ttl = expires_at - now;
    (ttl > 0).then_some(ttl as u64)
}

#[async_trait]
impl TokenBlacklist for RedisBlacklist {
    async fn add(&self, jti: &str, expires_at: i64) -> Result<(), BlacklistError> {
        // 已过期的令牌无需记录，校验时会先因过期被拒绝
        let Some(ttl) = remaining_ttl(expires_at, chrono::Utc::now().timestamp()) else {
            return Ok(());
        };

        let key = revoked_token_key(jti);
        self.with_retry("SETEX", |redis| {
            let key = key.clone();
            async move {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                let _: () = conn.set_ex(key, 1, ttl).await?;
                Ok(())
            }
        })
        .await?;

        Ok(())
    }

    async fn contains(&self, jti: &str) -> Result<bool, BlacklistError> {
        let key = revoked_token_key(jti);
        let found = self
            .with_retry("EXISTS", |redis| {
                let key = key.clone();
                async move {
                    let mut conn = redis.get_multiplexed_async_connection().await?;
                    let exists: bool = conn.exists(key).await?;
                    Ok(exists)
                }
            })
            .await?;

        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_follows_token_expiry() {
        assert_eq!(remaining_ttl(1_000, 400), Some(600));
        assert_eq!(remaining_ttl(1_000, 1_000), None);
        assert_eq!(remaining_ttl(1_000, 2_000), None);
    }

    #[test]
    fn io_errors_are_transient() {
        let io = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ));
        assert!(is_transient(&io));

        let type_error = RedisError::from((redis::ErrorKind::TypeError, "bad type"));
        assert!(!is_transient(&type_error));
    }

    // 端口 1 上没有服务，open 本身不会建立连接
    fn unreachable_blacklist() -> RedisBlacklist {
        let client = RedisClient::open("redis://127.0.0.1:1").unwrap();
        RedisBlacklist::new(Arc::new(client))
    }

    fn io_error() -> RedisError {
        RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "reset",
        ))
    }

    #[tokio::test]
    async fn transient_errors_are_retried_three_times() {
        let blacklist = unreachable_blacklist();
        let mut calls = 0;

        let result: Result<(), _> = blacklist
            .with_retry("TEST", |_| {
                calls += 1;
                async { Err(io_error()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn non_transient_errors_fail_immediately() {
        let blacklist = unreachable_blacklist();
        let mut calls = 0;

        let result: Result<(), _> = blacklist
            .with_retry("TEST", |_| {
                calls += 1;
                async { Err(RedisError::from((redis::ErrorKind::TypeError, "bad type"))) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn retry_stops_after_success() {
        let blacklist = unreachable_blacklist();
        let mut calls = 0;

        let result = blacklist
            .with_retry("TEST", |_| {
                calls += 1;
                let attempt = calls;
                async move {
                    if attempt < 2 {
                        Err(io_error())
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn expired_tokens_are_not_written() {
        // 若尝试连接，必然因端口不可达而返回错误
        let blacklist = unreachable_blacklist();
        let past = chrono::Utc::now().timestamp() - 60;

        assert!(blacklist.add("expired-jti", past).await.is_ok());
    }

    #[tokio::test]
    async fn unreachable_backend_fails_closed() {
        let blacklist = unreachable_blacklist();

        let err = blacklist.contains("some-jti").await.unwrap_err();
        assert!(matches!(err, BlacklistError::Backend(_)));

        let future = chrono::Utc::now().timestamp() + 600;
        assert!(blacklist.add("some-jti", future).await.is_err());
    }
}
