//! 更新请求体清洗
//!
//! 只作用于 `PUT /users/:userId`。清洗不会拒绝请求，只会删掉危险字段、转义字符串。

use serde_json::{Map, Value};

/// 请求体清洗能力，处理器只依赖这个 trait
pub trait Sanitizer: Send + Sync {
    fn transform(&self, payload: Map<String, Value>) -> Map<String, Value>;
}

/// 默认清洗器
///
/// - 删除以 `$` 开头或包含 `.` 的键（防止操作符注入）
/// - 对所有字符串做 HTML 转义，递归处理嵌套对象和数组
///
/// 转义是幂等的：已经是 `&amp;` 这类实体的片段保持原样，
/// 读出记录后原样写回不会出现 `&amp;amp;`。
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadSanitizer;

impl Sanitizer for PayloadSanitizer {
    fn transform(&self, payload: Map<String, Value>) -> Map<String, Value> {
        clean_object(payload)
    }
}

/// 什么都不做，测试里用来对照
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Sanitizer for PassThrough {
    fn transform(&self, payload: Map<String, Value>) -> Map<String, Value> {
        payload
    }
}

fn is_unsafe_key(key: &str) -> bool {
    key.starts_with('$') || key.contains('.')
}

fn clean_object(object: Map<String, Value>) -> Map<String, Value> {
    object
        .into_iter()
        .filter(|(key, _)| !is_unsafe_key(key))
        .map(|(key, value)| (key, clean_value(value)))
        .collect()
}

fn clean_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(escape_html(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_value).collect()),
        Value::Object(object) => Value::Object(clean_object(object)),
        other => other,
    }
}

/// 本清洗器自己会产生的实体
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"];

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, c) in input.char_indices() {
        match c {
            '&' if ENTITIES.iter().any(|e| input[i..].starts_with(e)) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
