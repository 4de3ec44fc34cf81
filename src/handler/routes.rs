//! Route handlers
//!
//! Each handler maps a matched request to a JSON response. Handlers are
//! fallible; a returned `HandlerError` is converted into a JSON error
//! response by the dispatcher.

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::router::RequestContext;
use crate::http::{query, response, MessageBody};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// GET `/` — static welcome message
pub fn welcome(
    _ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    logger::log_root_request();
    let body = MessageBody {
        message: format!("Welcome to the {} HTTP Server!", state.description()),
    };
    Ok(response::json_response(StatusCode::OK, &body))
}

/// GET `/hello` — greeting interpolating the optional `name` query parameter
pub fn hello(
    ctx: &RequestContext,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    let pairs = query::parse(&ctx.raw_query);
    // Absent and empty both fall back to the default
    let name = query::first_value(&pairs, "name")
        .filter(|v| !v.is_empty())
        .unwrap_or("World");

    let greeting = format!("Hello, {name} from {}!", state.description());
    logger::log_greeting(&pairs, &greeting);

    let body = MessageBody { message: greeting };
    Ok(response::json_response(StatusCode::OK, &body))
}
