use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

const BODY_REQUIRED_MESSAGE: &str = "Request body is required";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// JSON request body. An empty body is reported as missing; a body that is
/// not JSON, or is sent without a JSON content type, is reported as invalid.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content_type = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Failed to read request body");
            ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
        })?;

        if bytes.is_empty() {
            return Err(ApiError::BadRequest(BODY_REQUIRED_MESSAGE.to_string()));
        }
        if !json_content_type {
            tracing::debug!("Rejected request body without a JSON content type");
            return Err(ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes).map_err(|rejection| {
            tracing::debug!(error = %rejection, "Rejected request body");
            ApiError::BadRequest(INVALID_BODY_MESSAGE.to_string())
        })?;
        Ok(JsonBody(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}
