//! # user-records-api
//!
//! 基于 Axum 的用户记录 CRUD 服务：
//! - `app`：路由、处理器、用户存储
//! - `core`：错误、配置、中间件、请求清洗
//! - `infrastructure`：日志和数据库连接

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
