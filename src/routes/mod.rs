pub mod item;
pub mod store;
pub mod user;

use crate::auth::TokenClaims;
use crate::error::AppError;

/// 管理员权限检查，在认证通过之后由处理函数调用
pub(crate) fn require_admin(claims: &TokenClaims) -> Result<(), AppError> {
    if claims.is_admin() {
        Ok(())
    } else {
        tracing::info!("User {} denied admin operation", claims.sub);
        Err(AppError::AdminRequired)
    }
}
