//! 用户处理器

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::model::{NewUser, User, UserPatch};
use crate::app::AppState;
use crate::core::error::CoreError;

pub const USER_NOT_FOUND: &str = "User not found";

/// 年龄区间查询参数，原样收取字符串后再解析
#[derive(Debug, Deserialize)]
pub struct AgeRangeQuery {
    #[serde(rename = "minAge")]
    pub min_age: Option<String>,
    #[serde(rename = "maxAge")]
    pub max_age: Option<String>,
}

fn not_found() -> CoreError {
    CoreError::NotFound(USER_NOT_FOUND.to_string())
}

/// 非 UUID 的 id 不可能匹配任何记录
fn parse_user_id(raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

/// 缺省表示不设边界，出现但不是整数则为 400
fn parse_bound(name: &str, raw: Option<&str>, open: i32) -> Result<i32, CoreError> {
    match raw {
        None => Ok(open),
        Some(value) => value
            .trim()
            .parse::<i32>()
            .map_err(|_| CoreError::BadRequest(format!("{} must be an integer", name))),
    }
}

fn decode<T: serde::de::DeserializeOwned>(payload: Map<String, Value>) -> Result<T, CoreError> {
    serde_json::from_value(Value::Object(payload)).map_err(|e| CoreError::BadRequest(e.to_string()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let Json(payload) = payload?;
    let new_user: NewUser = decode(payload)?;
    let user = state.store.insert(new_user).await?;

    info!("Created user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.store.find_all().await?;
    Ok(Json(users))
}

/// GET /users/by-age?minAge=N&maxAge=M
pub async fn list_users_by_age(
    State(state): State<AppState>,
    Query(query): Query<AgeRangeQuery>,
) -> Result<Json<Vec<User>>, CoreError> {
    let min = parse_bound("minAge", query.min_age.as_deref(), i32::MIN)?;
    let max = parse_bound("maxAge", query.max_age.as_deref(), i32::MAX)?;

    let users = state.store.find_by_age_range(min, max).await?;
    Ok(Json(users))
}

/// GET /users/:userId
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, CoreError> {
    let id = parse_user_id(&user_id)?;
    let user = state.store.find_by_id(id).await?.ok_or_else(not_found)?;
    Ok(Json(user))
}

/// PUT /users/:userId，先清洗请求体再更新
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<User>, CoreError> {
    let id = parse_user_id(&user_id)?;
    let Json(payload) = payload?;
    let patch: UserPatch = decode(state.sanitizer.transform(payload))?;

    let user = state
        .store
        .update_by_id(id, patch)
        .await?
        .ok_or_else(not_found)?;

    info!("Updated user {}", user.id);
    Ok(Json(user))
}

/// DELETE /users/:userId
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, CoreError> {
    let id = parse_user_id(&user_id)?;
    if !state.store.delete_by_id(id).await? {
        return Err(not_found());
    }

    info!("Deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}
