// One module per collection; each function is a single route.
pub mod contents;
pub mod journeys;
pub mod knowledges;
pub mod points;
pub mod subjects;
pub mod trails;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - Service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Learning Trails API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Knowledge areas, subjects, journeys, trails and contents",
            "endpoints": {
                "knowledges": "/knowledges[/:id]",
                "subjects": "/subjects[/:id]",
                "points": "/points[/:id]",
                "journeys": "/journeys[/:id]",
                "trails": "/trails[/:id]",
                "contents": "/contents[/:id]",
                "health": "/health"
            }
        }
    }))
}

/// GET /health - 503 while the store is unreachable
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
