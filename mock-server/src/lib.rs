use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Key the mock rejects with 401.
pub const INVALID_API_KEY: &str = "invalid-key";
/// Key the mock rejects with 402.
pub const INACTIVE_API_KEY: &str = "inactive-key";

pub const DEFAULT_LIMIT: i64 = 1000;
pub const RESET_SECONDS: u64 = 3600;

/// Names the mock knows, matched case-insensitively.
const KNOWN: &[(&str, &str, f64, i64)] = &[
    ("alice", "female", 0.98, 391_453),
    ("john", "male", 0.99, 2_270_427),
    ("kim", "female", 0.72, 187_561),
    ("peter", "male", 0.99, 1_094_417),
];

#[derive(Clone, Debug, Serialize)]
pub struct Prediction {
    pub name: String,
    pub gender: Option<String>,
    pub probability: f64,
    pub count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
}

#[derive(Debug)]
pub struct Quota {
    pub limit: i64,
    pub remaining: i64,
}

pub type Db = Arc<Mutex<Quota>>;

pub fn app() -> Router {
    app_with_limit(DEFAULT_LIMIT)
}

/// Router whose quota window holds `limit` names.
pub fn app_with_limit(limit: i64) -> Router {
    let db: Db = Arc::new(Mutex::new(Quota {
        limit,
        remaining: limit,
    }));
    Router::new()
        .route("/", get(genderize))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_limit(listener, DEFAULT_LIMIT).await
}

pub async fn run_with_limit(listener: TcpListener, limit: i64) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_limit(limit)).await
}

pub fn predict(name: &str, country_id: Option<&str>) -> Prediction {
    let known = KNOWN
        .iter()
        .find(|(known, ..)| known.eq_ignore_ascii_case(name));
    let (gender, probability, count) = match known {
        Some((_, gender, probability, count)) => (Some(gender.to_string()), *probability, *count),
        None => (None, 0.0, 0),
    };
    Prediction {
        name: name.to_string(),
        gender,
        probability,
        count,
        country_id: country_id.map(str::to_string),
    }
}

async fn genderize(State(db): State<Db>, Query(params): Query<Vec<(String, String)>>) -> Response {
    let mut names = Vec::new();
    let mut batch = false;
    let mut country_id = None;
    let mut api_key = None;
    for (key, value) in params {
        match key.as_str() {
            "name" => names.push(value),
            "name[]" => {
                batch = true;
                names.push(value);
            }
            "country_id" => country_id = Some(value),
            "apikey" => api_key = Some(value),
            _ => {}
        }
    }
    debug!(names = names.len(), batch, "genderize request");

    let mut quota = db.lock().await;
    let headers = [
        ("X-Rate-Limit-Limit", quota.limit.to_string()),
        ("X-Rate-Limit-Remaining", quota.remaining.to_string()),
        ("X-Rate-Reset", RESET_SECONDS.to_string()),
    ];

    let rejection = match api_key.as_deref() {
        Some(INVALID_API_KEY) => Some((StatusCode::UNAUTHORIZED, "Invalid API key")),
        Some(INACTIVE_API_KEY) => Some((StatusCode::PAYMENT_REQUIRED, "Subscription is not active")),
        _ if names.is_empty() => Some((StatusCode::UNPROCESSABLE_ENTITY, "Missing 'name' parameter")),
        _ if names.iter().any(|n| n.trim().is_empty()) => {
            Some((StatusCode::UNPROCESSABLE_ENTITY, "Invalid 'name' parameter"))
        }
        _ if quota.remaining == 0 => Some((StatusCode::TOO_MANY_REQUESTS, "Request limit reached")),
        _ if names.len() as i64 > quota.remaining => Some((
            StatusCode::TOO_MANY_REQUESTS,
            "Request limit too low to process request",
        )),
        _ => None,
    };
    if let Some((status, message)) = rejection {
        return (status, headers, Json(json!({ "error": message }))).into_response();
    }

    quota.remaining -= names.len() as i64;
    let headers = [
        ("X-Rate-Limit-Limit", quota.limit.to_string()),
        ("X-Rate-Limit-Remaining", quota.remaining.to_string()),
        ("X-Rate-Reset", RESET_SECONDS.to_string()),
    ];
    let predictions: Vec<Prediction> = names
        .iter()
        .map(|name| predict(name, country_id.as_deref()))
        .collect();

    if batch {
        (StatusCode::OK, headers, Json(predictions)).into_response()
    } else {
        // A plain `name` parameter answers with the first prediction alone.
        let first = predictions.into_iter().next();
        (StatusCode::OK, headers, Json(first)).into_response()
    }
}
