use axum::response::Json;
use serde_json::{json, Value};

/// 存活检查
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
