use axum::Json;
use serde_json::{json, Value};

pub async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
