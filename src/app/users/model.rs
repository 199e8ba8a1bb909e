//! 用户数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// 已存储的用户记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
}

/// 创建用户请求，所有字段可选
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce_age")]
    pub age: Option<i32>,
}

/// 更新用户请求，只有出现的字段会被替换
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "coerce_age")]
    pub age: Option<i32>,
}

impl User {
    pub fn from_new(id: Uuid, new_user: NewUser) -> Self {
        Self {
            id,
            username: new_user.username,
            email: new_user.email,
            age: new_user.age,
        }
    }

    /// 把补丁中出现的字段写入记录
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(username) = patch.username {
            self.username = Some(username);
        }
        if let Some(email) = patch.email {
            self.email = Some(email);
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}

/// age 接受整数、整数值的浮点数、或十进制整数字符串
fn coerce_age<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i)
                    .map(Some)
                    .map_err(|_| de::Error::custom("age is out of range"))
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                        Ok(Some(f as i32))
                    }
                    _ => Err(de::Error::custom("age must be an integer")),
                }
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| de::Error::custom("age must be an integer")),
        Some(_) => Err(de::Error::custom("age must be an integer")),
    }
}
