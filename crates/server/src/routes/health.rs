use axum::{extract::State, response::Json as ResponseJson};
use chrono::{DateTime, Utc};
use db::models::task::Task;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseStatus {
    pub status: String,
    pub total_tasks: u64,
}

pub async fn health_check() -> ResponseJson<HealthResponse> {
    ResponseJson(HealthResponse {
        message: "Task API is running".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Connectivity check plus a row count.
pub async fn database_check(
    State(state): State<AppState>,
) -> Result<ResponseJson<DatabaseStatus>, ApiError> {
    state
        .db()
        .ping()
        .await
        .map_err(ApiError::DatabaseUnavailable)?;
    let total_tasks = Task::count(&state.db().pool)
        .await
        .map_err(ApiError::DatabaseUnavailable)?;

    Ok(ResponseJson(DatabaseStatus {
        status: "ok".to_string(),
        total_tasks,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use db::ConnectionTrait;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn root_and_health_report_version() {
        let app = TestApp::new().await;

        for uri in ["/", "/health"] {
            let (status, body) = app.request(Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "Task API is running");
            assert_eq!(body["version"], "1.0.0");
            assert!(body["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn database_check_counts_rows() {
        let app = TestApp::new().await;
        app.request(Method::POST, "/api/tasks", Some(json!({ "title": "one" })))
            .await;

        let (status, body) = app.request(Method::GET, "/health/db", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["total_tasks"], 1);
    }

    #[tokio::test]
    async fn database_check_fails_when_storage_is_broken() {
        let app = TestApp::new().await;
        app.state
            .db()
            .pool
            .execute_unprepared("DROP TABLE tasks")
            .await
            .unwrap();

        let (status, body) = app.request(Method::GET, "/health/db", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Unable to reach database");
    }
}
