use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use config::DatabaseConfig;
use db::{DBService, schema};
use serde_json::Value;
use test_support::TempDatabase;
use tower::ServiceExt;

use crate::{AppState, http};

/// Router over a fresh on-disk SQLite database. The database lives as long as
/// this value.
pub struct TestApp {
    _temp: TempDatabase,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp = TempDatabase::new();
        let db = DBService::new(&DatabaseConfig::from_url(temp.url()))
            .await
            .unwrap();
        schema::ensure_tasks_table(&db.pool).await.unwrap();
        let state = AppState::new(db);
        let router = http::router(state.clone());
        Self {
            _temp: temp,
            state,
            router,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
