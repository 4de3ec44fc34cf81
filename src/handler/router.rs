//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Holds the explicit routing table
//! mapping (method, path) to a handler function and converts both routing
//! misses and handler faults into JSON responses at the dispatch boundary.

use crate::config::AppState;
use crate::error::HandlerError;
use crate::handler::routes;
use crate::http::response;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Handler signature: matched request in, response or fault out
pub type RouteHandlerFn =
    fn(&RequestContext, &AppState) -> Result<Response<Full<Bytes>>, HandlerError>;

/// A registered route: exact method and path bound to a handler
struct Route {
    method: Method,
    path: &'static str,
    handler: RouteHandlerFn,
}

/// Routing table built once at startup
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: vec![
                Route {
                    method: Method::GET,
                    path: "/",
                    handler: routes::welcome,
                },
                Route {
                    method: Method::GET,
                    path: "/hello",
                    handler: routes::hello,
                },
            ],
        }
    }

    /// Exact match on method and path
    fn lookup(&self, method: &Method, path: &str) -> Option<RouteHandlerFn> {
        self.routes
            .iter()
            .find(|r| r.method == *method && r.path == path)
            .map(|r| r.handler)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

/// Request context extracted from the incoming request
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    /// Query string without the leading `?`, empty when absent
    pub raw_query: String,
    /// Path and query as requested, echoed verbatim in 404 payloads
    pub url: String,
}

impl RequestContext {
    /// Build a context from a method and a request target (path with optional
    /// query string)
    pub fn new(method: Method, url: &str) -> Self {
        let (path, raw_query) = match url.split_once('?') {
            Some((p, q)) => (p.to_string(), q.to_string()),
            None => (url.to_string(), String::new()),
        };
        Self {
            method,
            path,
            raw_query,
            url: url.to_string(),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    router: Arc<Router>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let url = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_string(), ToString::to_string);
    let ctx = RequestContext::new(req.method().clone(), &url);
    Ok(dispatch(&ctx, &router, &state))
}

/// Look up the route and run it, shaping misses and faults into JSON
pub fn dispatch(ctx: &RequestContext, router: &Router, state: &AppState) -> Response<Full<Bytes>> {
    let Some(handler) = router.lookup(&ctx.method, &ctx.path) else {
        logger::log_route_miss(&ctx.url);
        return response::not_found(ctx.method.as_str(), &ctx.url);
    };

    match handler(ctx, state) {
        Ok(resp) => resp,
        Err(err) => {
            logger::log_handler_error(&err, ctx.method.as_str(), &ctx.path);
            response::handler_error(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn test_state() -> AppState {
        let cfg = Config::load_from("no_such_config_file").unwrap();
        AppState::new(&cfg)
    }

    async fn body_json(resp: Response<Full<Bytes>>) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(url: &str) -> RequestContext {
        RequestContext::new(Method::GET, url)
    }

    #[test]
    fn test_lookup_registered_routes() {
        let router = Router::new();
        assert!(router.lookup(&Method::GET, "/").is_some());
        assert!(router.lookup(&Method::GET, "/hello").is_some());
    }

    #[test]
    fn test_lookup_misses() {
        let router = Router::new();
        assert!(router.lookup(&Method::GET, "/missing").is_none());
        // Registered path, unregistered method
        assert!(router.lookup(&Method::POST, "/").is_none());
        // No prefix matching
        assert!(router.lookup(&Method::GET, "/hello/there").is_none());
    }

    #[test]
    fn test_context_splits_query() {
        let ctx = get("/hello?name=Ada");
        assert_eq!(ctx.path, "/hello");
        assert_eq!(ctx.raw_query, "name=Ada");
        assert_eq!(ctx.url, "/hello?name=Ada");

        let ctx = get("/hello");
        assert_eq!(ctx.path, "/hello");
        assert_eq!(ctx.raw_query, "");
    }

    #[tokio::test]
    async fn test_root_welcome() {
        let resp = dispatch(&get("/"), &Router::new(), &test_state());
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "message": "Welcome to the Node.js (Fastify + TypeScript) HTTP Server!"
            })
        );
    }

    #[tokio::test]
    async fn test_hello_default_name() {
        let resp = dispatch(&get("/hello"), &Router::new(), &test_state());
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "message": "Hello, World from Node.js (Fastify + TypeScript)!"
            })
        );
    }

    #[tokio::test]
    async fn test_hello_empty_name_uses_default() {
        let resp = dispatch(&get("/hello?name="), &Router::new(), &test_state());
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await["message"],
            "Hello, World from Node.js (Fastify + TypeScript)!"
        );
    }

    #[tokio::test]
    async fn test_hello_with_name() {
        let resp = dispatch(&get("/hello?name=Ada"), &Router::new(), &test_state());
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "message": "Hello, Ada from Node.js (Fastify + TypeScript)!"
            })
        );
    }

    #[tokio::test]
    async fn test_hello_name_needing_json_escaping() {
        let resp = dispatch(
            &get("/hello?name=%22Ada%22"),
            &Router::new(),
            &test_state(),
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(
            body_json(resp).await["message"],
            "Hello, \"Ada\" from Node.js (Fastify + TypeScript)!"
        );
    }

    #[tokio::test]
    async fn test_unmatched_path_is_404() {
        let resp = dispatch(&get("/missing"), &Router::new(), &test_state());
        assert_eq!(resp.status(), 404);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "error": "Not Found",
                "message": "Route GET:/missing not found"
            })
        );
    }

    #[tokio::test]
    async fn test_unmatched_method_is_404() {
        let ctx = RequestContext::new(Method::POST, "/");
        let resp = dispatch(&ctx, &Router::new(), &test_state());
        assert_eq!(resp.status(), 404);
        assert_eq!(
            body_json(resp).await["message"],
            "Route POST:/ not found"
        );
    }

    #[tokio::test]
    async fn test_404_echoes_query_string() {
        let resp = dispatch(&get("/missing?x=1"), &Router::new(), &test_state());
        assert_eq!(resp.status(), 404);
        assert_eq!(
            body_json(resp).await["message"],
            "Route GET:/missing?x=1 not found"
        );
    }

    fn failing_with_status(
        _ctx: &RequestContext,
        _state: &AppState,
    ) -> Result<Response<Full<Bytes>>, HandlerError> {
        Err(HandlerError::with_status(
            400,
            "Bad Request",
            "name must not be numeric",
        ))
    }

    fn failing_plain(
        _ctx: &RequestContext,
        _state: &AppState,
    ) -> Result<Response<Full<Bytes>>, HandlerError> {
        Err(HandlerError::internal("something broke"))
    }

    fn router_with(path: &'static str, handler: RouteHandlerFn) -> Router {
        Router {
            routes: vec![Route {
                method: Method::GET,
                path,
                handler,
            }],
        }
    }

    #[tokio::test]
    async fn test_fault_keeps_declared_status() {
        let router = router_with("/fail", failing_with_status);
        let resp = dispatch(&get("/fail"), &router, &test_state());
        assert_eq!(resp.status(), 400);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "error": "Bad Request",
                "message": "name must not be numeric"
            })
        );
    }

    #[tokio::test]
    async fn test_fault_without_status_maps_to_500() {
        let router = router_with("/fail", failing_plain);
        let resp = dispatch(&get("/fail"), &router, &test_state());
        assert_eq!(resp.status(), 500);
        assert_eq!(
            body_json(resp).await,
            serde_json::json!({
                "error": "Internal Server Error",
                "message": "something broke"
            })
        );
    }
}
