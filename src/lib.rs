use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use config::Config;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use auth::{
    AdminClaims, ClaimsResolver, MemoryBlacklist, Requirements, TokenBlacklist, TokenError,
    TokenIssuer, TokenKeys, TokenValidator,
};
use database::{ItemRepository, MemoryDatabase, StoreRepository, UserRepository};
use middleware::{log_errors, protect};

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod utils;

pub mod routes;

/// 存储与黑名单后端
#[derive(Clone)]
pub struct Backends {
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub blacklist: Arc<dyn TokenBlacklist>,
}

impl Backends {
    pub fn in_memory() -> Self {
        let db = Arc::new(MemoryDatabase::new());
        Self {
            users: db.clone(),
            items: db.clone(),
            stores: db,
            blacklist: Arc::new(MemoryBlacklist::new()),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub stores: Arc<dyn StoreRepository>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
}

impl AppState {
    /// 以配置的管理员 id 作为唯一的自定义声明来源
    pub fn new(config: Config, backends: Backends) -> Result<Self, TokenError> {
        let resolver = Arc::new(AdminClaims {
            admin_id: config.admin_user_id,
        });
        Self::with_claims_resolver(config, backends, resolver)
    }

    pub fn with_claims_resolver(
        config: Config,
        backends: Backends,
        resolver: Arc<dyn ClaimsResolver>,
    ) -> Result<Self, TokenError> {
        let keys = TokenKeys::from_secret(config.jwt_secret.as_bytes())?;
        let issuer = TokenIssuer::new(
            keys.clone(),
            config.access_token_expiration(),
            config.refresh_token_expiration(),
            resolver,
        );
        let validator = TokenValidator::new(&keys, backends.blacklist);

        Ok(Self {
            config,
            users: backends.users,
            items: backends.items,
            stores: backends.stores,
            issuer: Arc::new(issuer),
            validator: Arc::new(validator),
        })
    }
}

/// 组装全部路由，每条受保护路由显式声明令牌要求
pub fn create_app(state: AppState) -> Router {
    let s = &state;

    Router::new()
        // 公开路由
        .route("/register", post(routes::user::register))
        .route("/login", post(routes::user::login))
        .route("/items", get(routes::item::list_items))
        .route("/stores", get(routes::store::list_stores))
        // 令牌生命周期
        .route(
            "/refresh",
            protect(s, Requirements::refresh(), post(routes::user::refresh_token)),
        )
        .route(
            "/logout",
            protect(s, Requirements::access(), post(routes::user::logout)),
        )
        // 用户
        .route(
            "/user/{user_id}",
            protect(
                s,
                Requirements::access(),
                get(routes::user::get_user).delete(routes::user::delete_user),
            ),
        )
        // 商品
        .route(
            "/item/{name}",
            get(routes::item::get_item)
                .merge(protect(
                    s,
                    Requirements::fresh_access(),
                    post(routes::item::create_item),
                ))
                .merge(protect(
                    s,
                    Requirements::access(),
                    put(routes::item::put_item).delete(routes::item::delete_item),
                )),
        )
        // 商店
        .route(
            "/store/{name}",
            get(routes::store::get_store)
                .merge(protect(
                    s,
                    Requirements::fresh_access(),
                    post(routes::store::create_store),
                ))
                .merge(protect(
                    s,
                    Requirements::access(),
                    delete(routes::store::delete_store),
                )),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(log_errors)),
        )
        .with_state(state)
}
