use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/foo", post(echo_body))
        .route("/exception", get(fail))
        .route("/delay/{ms}", get(delay))
        .route("/echo", get(echo_query))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Hello, world!" }))
}

/// Echoes the JSON request body and tags the response with `x-test` so
/// clients can verify response-header capture.
async fn echo_body(Json(body): Json<Value>) -> Response {
    ([("x-test", "Test")], Json(body)).into_response()
}

/// Plain-text 500, for exercising status passthrough and the non-JSON
/// body fallback on the client side.
async fn fail() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "mock exception").into_response()
}

async fn delay(Path(ms): Path<u64>) -> Json<Value> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(json!({ "slept_ms": ms }))
}

/// Reflects the query string and request headers back to the caller.
async fn echo_query(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let headers: HashMap<String, String> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(json!({ "query": params, "headers": headers }))
}
