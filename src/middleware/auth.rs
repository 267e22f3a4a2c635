use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{Next, from_fn_with_state},
    response::Response,
    routing::MethodRouter,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};

use crate::AppState;
use crate::auth::{AuthError, Requirements, TokenValidator};

/// 单条路由的认证配置
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<TokenValidator>,
    requirements: Requirements,
}

impl AuthGate {
    pub fn new(validator: Arc<TokenValidator>, requirements: Requirements) -> Self {
        Self {
            validator,
            requirements,
        }
    }
}

/// 校验 Bearer 令牌，通过后把 TokenClaims 放入请求扩展
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(Authorization(bearer)) = request.headers().typed_get::<Authorization<Bearer>>()
    else {
        tracing::debug!("{} {}: no bearer token", request.method(), request.uri().path());
        return Err(AuthError::MissingToken);
    };

    let claims = gate
        .validator
        .validate(bearer.token(), gate.requirements)
        .await
        .inspect_err(|e| {
            tracing::debug!("{} {}: {}", request.method(), request.uri().path(), e);
        })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// 为单个方法路由挂上认证要求
pub fn protect(
    state: &AppState,
    requirements: Requirements,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(
        AuthGate::new(state.validator.clone(), requirements),
        auth_middleware,
    ))
}
