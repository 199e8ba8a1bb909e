//! 用户存储抽象
//!
//! 处理器只依赖 [`UserStore`]，具体实现在启动时构造一次并注入 `AppState`。

use async_trait::async_trait;
use std::sync::RwLock;
use thiserror::Error;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};
use crate::core::error::CoreError;

/// 存储层失败，不区分具体原因，统一映射为 500
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// 存储失败对客户端一律是 500
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// 按插入顺序返回全部记录
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// `min <= age <= max`，没有 age 的记录不返回
    async fn find_by_age_range(&self, min: i32, max: i32) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// 返回更新后的记录，记录不存在时返回 `None`
    async fn update_by_id(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError>;

    /// 记录不存在时返回 `false`
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// 进程内存储，保持插入顺序
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<T>(_: T) -> StoreError {
        StoreError::Unavailable("memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let user = User::from_new(Uuid::new_v4(), new_user);
        self.users
            .write()
            .map_err(Self::poisoned)?
            .push(user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().map_err(Self::poisoned)?.clone())
    }

    async fn find_by_age_range(&self, min: i32, max: i32) -> Result<Vec<User>, StoreError> {
        let users = self.users.read().map_err(Self::poisoned)?;
        Ok(users
            .iter()
            .filter(|user| matches!(user.age, Some(age) if min <= age && age <= max))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(Self::poisoned)?;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().map_err(Self::poisoned)?;
        Ok(users.iter_mut().find(|user| user.id == id).map(|user| {
            user.apply(patch);
            user.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut users = self.users.write().map_err(Self::poisoned)?;
        let before = users.len();
        users.retain(|user| user.id != id);
        Ok(users.len() != before)
    }
}
