//! 服务信息与回显

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::app::AppState;
use crate::core::error::CoreError;

pub const DATA_MISSING: &str = "Data is missing in the request body";

#[derive(Debug, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    /// 进程启动以来的秒数
    pub uptime: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    #[serde(rename = "echoedData")]
    pub echoed_data: Value,
}

/// GET /server-info
pub async fn server_info(State(state): State<AppState>) -> Json<ServerInfo> {
    Json(ServerInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// POST /echo
///
/// 没有请求体、请求体不是 JSON 对象、或 `data` 为假值，都返回同一个 400
pub async fn echo(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<EchoResponse>, CoreError> {
    let data = match payload {
        Ok(Json(Value::Object(mut body))) => body.remove("data").unwrap_or(Value::Null),
        _ => Value::Null,
    };

    if !is_truthy(&data) {
        return Err(CoreError::BadRequest(DATA_MISSING.to_string()));
    }

    Ok(Json(EchoResponse { echoed_data: data }))
}

/// null、false、0、空字符串视为缺失
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
