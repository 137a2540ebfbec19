use std::any::Any;

use axum::{
    Router,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{AppState, error::ApiError, routes};

mod cors;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/health", get(routes::health::health_check))
        .route("/health/db", get(routes::health::database_check))
        .nest("/api", routes::tasks::router())
        .method_not_allowed_fallback(endpoint_not_found)
        .fallback(endpoint_not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors::cors_layer())
        .layer(from_fn(cors::answer_preflight))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

async fn endpoint_not_found() -> ApiError {
    ApiError::endpoint_not_found()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(detail).into_response()
}
