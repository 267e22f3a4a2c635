use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use uuid::Uuid;

use super::claims::{ClaimsResolver, RESERVED_CLAIMS, TokenClaims, TokenKind};

pub(crate) const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,
    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// HS256 签名密钥对
#[derive(Clone)]
pub struct TokenKeys {
    pub(crate) encoding: EncodingKey,
    pub(crate) decoding: DecodingKey,
}

impl TokenKeys {
    pub fn from_secret(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        })
    }
}

/// 签发结果
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: i64,
}

pub struct TokenIssuer {
    keys: TokenKeys,
    access_ttl: Duration,
    refresh_ttl: Duration,
    resolver: Arc<dyn ClaimsResolver>,
}

impl TokenIssuer {
    pub fn new(
        keys: TokenKeys,
        access_ttl: Duration,
        refresh_ttl: Duration,
        resolver: Arc<dyn ClaimsResolver>,
    ) -> Self {
        Self {
            keys,
            access_ttl,
            refresh_ttl,
            resolver,
        }
    }

    pub fn issue_access_token(&self, identity: i64, fresh: bool) -> Result<IssuedToken, TokenError> {
        self.issue(identity, TokenKind::Access, fresh, self.access_ttl)
    }

    /// 刷新令牌从不 fresh
    pub fn issue_refresh_token(&self, identity: i64) -> Result<IssuedToken, TokenError> {
        self.issue(identity, TokenKind::Refresh, false, self.refresh_ttl)
    }

    fn issue(
        &self,
        identity: i64,
        kind: TokenKind,
        fresh: bool,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let expires_at = now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX));

        let mut custom = self.resolver.resolve(identity);
        custom.retain(|name, _| {
            let reserved = RESERVED_CLAIMS.contains(&name.as_str());
            if reserved {
                tracing::warn!("Dropping custom claim '{}': name is reserved", name);
            }
            !reserved
        });

        let claims = TokenClaims {
            sub: identity,
            kind,
            jti: Uuid::new_v4().to_string(),
            fresh,
            iat: now,
            nbf: now,
            exp: expires_at,
            custom,
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.keys.encoding)?;
        tracing::debug!("Issued {:?} token {} for user {}", kind, claims.jti, identity);

        Ok(IssuedToken {
            token,
            jti: claims.jti,
            expires_at,
        })
    }
}
