use axum::{
    Json,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

const ALLOWED_HEADERS: &str = "Content-Type,Authorization";
const ALLOWED_METHODS: &str = "GET,PUT,POST,DELETE,PATCH,OPTIONS";

/// Adds `Access-Control-Allow-Origin: *` to regular responses. Preflights
/// never reach it: `answer_preflight` sits outside and answers them.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}

/// Answers every `OPTIONS` request the same way, whether or not it is a
/// well-formed CORS preflight and whatever the path.
pub async fn answer_preflight(req: Request, next: Next) -> Response {
    if req.method() != Method::OPTIONS {
        return next.run(req).await;
    }

    let mut response = Json(json!({ "status": "OK" })).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    response
}
