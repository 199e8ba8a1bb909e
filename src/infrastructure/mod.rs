//! 基础设施层：日志、数据库连接

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
