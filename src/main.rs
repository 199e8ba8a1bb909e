use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use user_records_api::app::users::store::{MemoryUserStore, UserStore};
use user_records_api::core::config::{Config, StoreBackend, DEFAULT_CONFIG_PATH};
use user_records_api::infrastructure::logger::Logger;
use user_records_api::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(DEFAULT_CONFIG_PATH)?;

    // 初始化日志
    Logger::init(&config.logging.level);

    info!("Starting user records server...");

    let store = connect_store(&config).await?;
    let app = build_router(AppState::new(store));

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 User records server running on http://{}", listener.local_addr()?);
    info!("📖 API endpoints:");
    info!("   POST   /users              - Create user");
    info!("   GET    /users              - List users");
    info!("   GET    /users/by-age       - List users with minAge <= age <= maxAge");
    info!("   GET    /users/:userId      - Get user");
    info!("   PUT    /users/:userId      - Update user");
    info!("   DELETE /users/:userId      - Delete user");
    info!("   GET    /server-info        - Name, version and uptime");
    info!("   POST   /echo               - Echo the data field");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// 按配置构造存储，连接只在启动时建立一次
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory user store");
            Ok(Arc::new(MemoryUserStore::new()))
        }
        StoreBackend::Postgres => postgres_store(config).await,
    }
}

#[cfg(feature = "database")]
async fn postgres_store(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    use user_records_api::app::users::postgres::PgUserStore;
    use user_records_api::infrastructure::database::DatabaseManager;

    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    db.ensure_schema()
        .await
        .context("failed to prepare users table")?;

    Ok(Arc::new(PgUserStore::new(db.into_pool())))
}

#[cfg(not(feature = "database"))]
async fn postgres_store(_config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    warn!("Built without the `database` feature, falling back to the in-memory user store");
    Ok(Arc::new(MemoryUserStore::new()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
