//! 应用层：路由与共享状态

pub mod system;
pub mod users;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::access_log;
use crate::core::sanitize::{PayloadSanitizer, Sanitizer};
use users::store::UserStore;

/// 所有处理器共享的状态，启动时构造一次
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            sanitizer: Arc::new(PayloadSanitizer),
            started_at: Instant::now(),
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }
}

/// 创建路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/users",
            get(users::handler::list_users).post(users::handler::create_user),
        )
        .route("/users/by-age", get(users::handler::list_users_by_age))
        .route(
            "/users/:userId",
            get(users::handler::get_user)
                .put(users::handler::update_user)
                .delete(users::handler::delete_user),
        )
        .route("/server-info", get(system::handler::server_info))
        .route("/echo", post(system::handler::echo))
        .layer(middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
