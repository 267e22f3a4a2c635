use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 管理员标识的自定义声明名
pub const IS_ADMIN_CLAIM: &str = "is_admin";

/// 载荷固定字段，自定义声明不得重名
pub const RESERVED_CLAIMS: [&str; 7] = ["sub", "type", "jti", "fresh", "iat", "nbf", "exp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT 载荷
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64, // 用户ID
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub jti: String,
    #[serde(default)]
    pub fresh: bool,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    /// 自定义声明，平铺在载荷顶层
    #[serde(flatten)]
    pub custom: BTreeMap<String, bool>,
}

impl TokenClaims {
    pub fn identity(&self) -> i64 {
        self.sub
    }

    pub fn claim(&self, name: &str) -> bool {
        self.custom.get(name).copied().unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.claim(IS_ADMIN_CLAIM)
    }
}

/// 计算签发令牌时附带的自定义声明
pub trait ClaimsResolver: Send + Sync {
    fn resolve(&self, identity: i64) -> BTreeMap<String, bool>;
}

impl<F> ClaimsResolver for F
where
    F: Fn(i64) -> BTreeMap<String, bool> + Send + Sync,
{
    fn resolve(&self, identity: i64) -> BTreeMap<String, bool> {
        self(identity)
    }
}

/// 将配置的用户 id 标记为管理员
#[derive(Debug, Clone, Copy)]
pub struct AdminClaims {
    pub admin_id: i64,
}

impl ClaimsResolver for AdminClaims {
    fn resolve(&self, identity: i64) -> BTreeMap<String, bool> {
        BTreeMap::from([(IS_ADMIN_CLAIM.to_string(), identity == self.admin_id)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_resolver_flags_only_admin_id() {
        let resolver = AdminClaims { admin_id: 1 };
        assert_eq!(resolver.resolve(1).get(IS_ADMIN_CLAIM), Some(&true));
        assert_eq!(resolver.resolve(2).get(IS_ADMIN_CLAIM), Some(&false));
    }

    #[test]
    fn custom_claims_are_flattened() {
        let claims = TokenClaims {
            sub: 7,
            kind: TokenKind::Access,
            jti: "abc".into(),
            fresh: true,
            iat: 10,
            nbf: 10,
            exp: 20,
            custom: BTreeMap::from([("is_admin".to_string(), true)]),
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["is_admin"], true);
        assert_eq!(json["type"], "access");

        let back: TokenClaims = serde_json::from_value(json).unwrap();
        assert_eq!(back, claims);
        assert!(back.is_admin());
    }

    #[test]
    fn closures_resolve_claims() {
        let resolver = |id: i64| BTreeMap::from([("even".to_string(), id % 2 == 0)]);
        assert_eq!(resolver.resolve(4).get("even"), Some(&true));
    }
}
