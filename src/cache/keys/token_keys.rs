/// 已吊销令牌缓存键前缀
const REVOKED_TOKEN_PREFIX: &str = "token:revoked:";

/// 生成已吊销令牌缓存键
pub fn revoked_token_key(jti: &str) -> String {
    format!("{}{}", REVOKED_TOKEN_PREFIX, jti)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_prefixed() {
        assert_eq!(revoked_token_key("abc"), "token:revoked:abc");
    }
}
