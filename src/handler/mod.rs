//! Request handling: routing table, dispatch, and the route handlers

mod router;
mod routes;

pub use router::{dispatch, handle_request, RequestContext, Router};
