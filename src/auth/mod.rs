// 令牌生命周期：签发、校验、刷新、吊销

pub mod blacklist;
pub mod claims;
pub mod error;
pub mod issuer;
pub mod validator;

pub use blacklist::{BlacklistError, MemoryBlacklist, TokenBlacklist};
pub use claims::{AdminClaims, ClaimsResolver, IS_ADMIN_CLAIM, TokenClaims, TokenKind};
pub use error::AuthError;
pub use issuer::{IssuedToken, TokenError, TokenIssuer, TokenKeys};
pub use validator::{Requirements, TokenValidator};
