//! HTTP response building module
//!
//! Builders for the JSON responses the server emits. All payloads are
//! `application/json`; serialization failures degrade to a plain 500 rather
//! than dropping the connection.

use crate::error::HandlerError;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Single-field success payload: `{"message": "..."}`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MessageBody {
    pub message: String,
}

/// Error payload: `{"error": "...", "message": "..."}`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Build a JSON response with the given status
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return fallback_500();
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            fallback_500()
        })
}

/// Build the 404 payload for an unmatched route
pub fn not_found(method: &str, url: &str) -> Response<Full<Bytes>> {
    let body = ErrorBody {
        error: "Not Found".to_string(),
        message: format!("Route {method}:{url} not found"),
    };
    json_response(StatusCode::NOT_FOUND, &body)
}

/// Build the error payload for a handler fault
pub fn handler_error(err: &HandlerError) -> Response<Full<Bytes>> {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorBody {
        error: err.error_name().to_string(),
        message: err.message().to_string(),
    };
    json_response(status, &body)
}

/// Last-resort 500 when response construction itself fails
fn fallback_500() -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from(
        r#"{"error":"Internal Server Error","message":"Failed to build response"}"#,
    )));
    *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    resp
}
