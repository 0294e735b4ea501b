use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint
///
/// Reports the storage driver and the repository queue depth.
/// Used by load balancers and monitoring systems.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let stats = state.repo.stats();

    Json(json!({
        "status": "healthy",
        "storage": state.repo.driver(),
        "pendingTasks": stats.pending,
        "completedTasks": stats.completed,
        "failedTasks": stats.failed,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
