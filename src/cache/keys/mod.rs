/// 缓存键模块
pub mod token_keys;

pub use token_keys::revoked_token_key;
