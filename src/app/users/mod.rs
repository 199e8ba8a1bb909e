//! 用户记录的增删改查

pub mod handler;
pub mod model;
#[cfg(feature = "database")]
pub mod postgres;
pub mod store;
