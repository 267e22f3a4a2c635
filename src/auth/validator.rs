use std::sync::Arc;

use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};

use super::blacklist::TokenBlacklist;
use super::claims::{TokenClaims, TokenKind};
use super::error::AuthError;
use super::issuer::{ALGORITHM, TokenKeys};

/// 路由声明的令牌要求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirements {
    fresh: bool,
    refresh: bool,
}

impl Requirements {
    /// 任意访问令牌
    pub const fn access() -> Self {
        Self {
            fresh: false,
            refresh: false,
        }
    }

    /// 登录直接签发的 fresh 访问令牌
    pub const fn fresh_access() -> Self {
        Self {
            fresh: true,
            refresh: false,
        }
    }

    pub const fn refresh() -> Self {
        Self {
            fresh: false,
            refresh: true,
        }
    }

    pub fn must_be_fresh(&self) -> bool {
        self.fresh
    }

    pub fn must_be_refresh_kind(&self) -> bool {
        self.refresh
    }
}

pub struct TokenValidator {
    decoding: DecodingKey,
    validation: Validation,
    blacklist: Arc<dyn TokenBlacklist>,
}

impl TokenValidator {
    pub fn new(keys: &TokenKeys, blacklist: Arc<dyn TokenBlacklist>) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.validate_nbf = true;

        Self {
            decoding: keys.decoding.clone(),
            validation,
            blacklist,
        }
    }

    /// 依次校验签名、过期、类型、吊销、fresh，首个失败项决定错误
    pub async fn validate(
        &self,
        token: &str,
        requirements: Requirements,
    ) -> Result<TokenClaims, AuthError> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                _ => {
                    tracing::debug!("Token decode failed: {}", e);
                    AuthError::InvalidToken
                }
            })?
            .claims;

        let expected = if requirements.must_be_refresh_kind() {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        };
        if claims.kind != expected {
            tracing::debug!(
                "Token {} is {:?}, route expects {:?}",
                claims.jti,
                claims.kind,
                expected
            );
            return Err(AuthError::InvalidToken);
        }

        match self.blacklist.contains(&claims.jti).await {
            Ok(true) => return Err(AuthError::RevokedToken),
            Ok(false) => {}
            Err(e) => {
                tracing::error!("Blacklist lookup failed, rejecting token: {}", e);
                return Err(AuthError::InvalidToken);
            }
        }

        if requirements.must_be_fresh() && !claims.fresh {
            return Err(AuthError::FreshTokenRequired);
        }

        Ok(claims)
    }

    pub fn blacklist(&self) -> &Arc<dyn TokenBlacklist> {
        &self.blacklist
    }
}
