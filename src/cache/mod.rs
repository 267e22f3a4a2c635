// 缓存模块
// Redis 上的令牌黑名单

pub mod keys;
pub mod operations;

pub use operations::RedisBlacklist;
