use axum::Json;
use serde_json::{Value, json};

/// Liveness probe; never touches the store.
pub async fn ping_handler() -> Json<Value> {
    Json(json!({ "message": "ok" }))
}
