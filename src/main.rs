use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use storefront::{
    AppState, Backends,
    cache::RedisBlacklist,
    config::Config,
    create_app,
    database::{self, PgItemRepository, PgStoreRepository, PgUserRepository},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置，签名密钥缺失直接退出
    let config = Config::from_env().expect("Failed to load configuration");

    let mut backends = Backends::in_memory();

    // 设置数据库连接池
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .after_connect(|conn, _meta| {
                    Box::pin(async move {
                        conn.execute("SET application_name = 'storefront';").await?;
                        Ok(())
                    })
                })
                .connect(url)
                .await
                .expect("Failed to connect to Postgres");
            database::ensure_schema(&pool)
                .await
                .expect("Failed to create tables");

            backends.users = Arc::new(PgUserRepository::new(pool.clone()));
            backends.items = Arc::new(PgItemRepository::new(pool.clone()));
            backends.stores = Arc::new(PgStoreRepository::new(pool));
            tracing::info!("Using Postgres storage");
        }
        None => tracing::warn!("DATABASE_URL not set, using in-memory storage"),
    }

    // 设置 Redis 黑名单
    match &config.redis_url {
        Some(url) => {
            let redis_client =
                redis::Client::open(url.as_str()).expect("Failed to create Redis client");
            backends.blacklist = Arc::new(RedisBlacklist::new(Arc::new(redis_client)));
            tracing::info!("Using Redis token blacklist");
        }
        None => tracing::warn!("REDIS_URL not set, revoked tokens are kept in memory"),
    }

    // 设置应用状态
    let state = AppState::new(config.clone(), backends).expect("Invalid JWT signing key");
    let router = create_app(state);

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    // 启动服务器
    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Failed to start server");
}
