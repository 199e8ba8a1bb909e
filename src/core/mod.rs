//! 核心层：错误、配置、中间件、请求清洗

pub mod config;
pub mod error;
pub mod middleware;
pub mod sanitize;
